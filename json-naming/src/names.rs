use std::collections::{HashMap, hash_map::Entry};

use crate::{
    case::{Separators, convert},
    descriptor::{Discriminant, EnumDescriptor},
    encoded::EncodedText,
};

/// Bidirectional mapping between an enum's members and their serialized names.
#[derive(Debug)]
pub(crate) struct EnumNames {
    by_value: HashMap<Discriminant, EncodedText>,
    by_text: HashMap<Box<str>, Discriminant>,
}

impl EnumNames {
    /// Name every member: the override if one is declared, the converted identifier otherwise.
    ///
    /// When two members end up with the same name the first declared member keeps it.
    pub(crate) fn build(descriptor: &EnumDescriptor, separators: Separators) -> Self {
        let mut by_value = HashMap::with_capacity(descriptor.members.len());
        let mut by_text = HashMap::with_capacity(descriptor.members.len());

        for member in descriptor.members {
            let name = match member.rename() {
                Some(rename) => rename.to_owned(),
                None => convert(member.ident, separators).into_owned(),
            };

            match by_text.entry(Box::<str>::from(name.as_str())) {
                Entry::Vacant(entry) => {
                    entry.insert(member.value);
                }
                Entry::Occupied(entry) => {
                    let kept = descriptor.member(*entry.get()).map(|member| member.ident);
                    tracing::warn!(
                        enum_name = descriptor.name,
                        name = %name,
                        kept = ?kept,
                        ignored = member.ident,
                        "duplicate serialized enum name, keeping the first declared member"
                    );
                }
            }

            by_value
                .entry(member.value)
                .or_insert_with(|| EncodedText::new(&name));
        }

        tracing::debug!(
            enum_name = descriptor.name,
            members = descriptor.members.len(),
            separator = %separators.primary,
            "built enum name mapping"
        );

        Self { by_value, by_text }
    }

    pub(crate) fn name(&self, value: Discriminant) -> Option<&EncodedText> {
        self.by_value.get(&value)
    }

    pub(crate) fn value(&self, text: &str) -> Option<Discriminant> {
        self.by_text.get(text).copied()
    }
}
