//! Casting one call argument to a parameter type.

use mend_diagnostic::{ApplyContext, ApplyError, FixAction};
use mend_ir::{ElementId, Generation, NodeKind, ProgramTree, TypeId};

/// Family shared by every argument cast, for batch application.
const FAMILY: &str = "Cast argument";

/// Replace argument `index` of a call with `(target) argument`.
///
/// An argument that already is a cast has its cast replaced, not wrapped
/// again. Binary operands are parenthesised, since a cast binds tighter.
#[derive(Clone, Debug)]
pub struct CastArgumentFix {
    call: ElementId,
    index: usize,
    /// The argument element the fix was computed for.
    argument: ElementId,
    target: TypeId,
    /// Rendered target type, for the description.
    target_name: String,
    generation: Generation,
}

impl CastArgumentFix {
    pub fn new(
        tree: &ProgramTree,
        call: ElementId,
        index: usize,
        argument: ElementId,
        target: TypeId,
        target_name: impl Into<String>,
    ) -> Self {
        CastArgumentFix {
            call,
            index,
            argument,
            target,
            target_name: target_name.into(),
            generation: tree.generation(),
        }
    }

    pub fn call(&self) -> ElementId {
        self.call
    }

    /// Zero-based argument position.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn target(&self) -> TypeId {
        self.target
    }

    /// The operand the cast will wrap: the argument itself, or the operand
    /// of the argument's own cast.
    fn operand(tree: &ProgramTree, argument: ElementId) -> Option<ElementId> {
        match &tree.get(argument)?.kind {
            NodeKind::Cast { operand, .. } => Some(*operand),
            _ => Some(argument),
        }
    }
}

impl FixAction for CastArgumentFix {
    fn describe(&self, tree: &ProgramTree) -> String {
        let arg_count = tree.args(self.call).map_or(0, <[ElementId]>::len);
        if arg_count == 1 {
            format!("Cast argument to '{}'", self.target_name)
        } else {
            format!(
                "Cast {} argument to '{}'",
                ordinal(self.index + 1),
                self.target_name
            )
        }
    }

    fn family_key(&self) -> &str {
        FAMILY
    }

    fn is_available(&self, tree: &ProgramTree) -> bool {
        tree.generation() == self.generation
            && tree.is_in_scope(self.call)
            && tree.arg(self.call, self.index) == Ok(self.argument)
            && tree.type_of(self.argument) != Some(self.target)
    }

    #[tracing::instrument(level = "trace", skip_all, fields(index = self.index))]
    fn apply(&self, cx: &mut ApplyContext<'_, '_>) -> Result<(), ApplyError> {
        if !self.is_available(cx.tree()) {
            return Err(ApplyError::Stale);
        }
        let tree = cx.tree();
        let argument = tree.node(self.argument)?;
        let span = argument.span;
        let operand = Self::operand(tree, self.argument).ok_or(ApplyError::Stale)?;
        let operand_node = tree.node(operand)?;
        let (operand_ty, operand_span) = (operand_node.ty, operand_node.span);
        let needs_parens = operand_node.kind.binds_looser_than_cast();

        let edits = cx.edits()?;
        let inner = if needs_parens {
            edits.alloc(NodeKind::Paren(operand), operand_ty, operand_span)?
        } else {
            operand
        };
        let cast = edits.alloc(
            NodeKind::Cast {
                target: self.target,
                operand: inner,
            },
            self.target,
            span,
        )?;
        edits.replace(self.argument, cast)?;
        Ok(())
    }
}

/// `1st`, `2nd`, `3rd`, `4th`, ..., `11th`, `12th`, `13th`, `21st`.
pub(crate) fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}
