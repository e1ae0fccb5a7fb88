use crate::definition::TypeDefinitionFragment;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GroupKind {
    /// Every definition is an enum.
    AllEnum,
    /// At least one definition is an enum and at least one is not.
    MixedKind,
    /// No definition is an enum. Nothing to check for enums.
    NoneEnum,
}

pub fn classify(group: &[&TypeDefinitionFragment]) -> GroupKind {
    let enum_count = group.iter().filter(|fragment| fragment.is_enum()).count();
    if enum_count == 0 {
        GroupKind::NoneEnum
    } else if enum_count == group.len() {
        GroupKind::AllEnum
    } else {
        GroupKind::MixedKind
    }
}
