use std::collections::HashMap;

use tracing::debug;

use crate::error::{Error, Result};
use crate::option::{Names, OptionDescriptor, OptionKey, OptionValue};

/// Handle returned by registration; stable for the registry's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OptionId(usize);

impl OptionId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Declared options in registration order, keyed by letter and by name.
#[derive(Debug, Clone, Default)]
pub struct OptionRegistry {
    options: Vec<OptionDescriptor>,
    by_short: HashMap<char, usize>,
    by_long: HashMap<String, usize>,
}

impl OptionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an option. Its kind is the variant of `default`.
    pub fn register(
        &mut self,
        names: Names,
        default: OptionValue,
        description: &str,
    ) -> Result<OptionId> {
        if names.short.is_none() && names.long.is_none() {
            return Err(Error::MissingKey);
        }
        if let Some(name) = &names.long {
            if self.by_long.contains_key(name) {
                return Err(Error::DuplicateLong(name.clone()));
            }
        }
        if let Some(c) = names.short {
            if self.by_short.contains_key(&c) {
                return Err(Error::DuplicateShort(c));
            }
        }

        let idx = self.options.len();
        if let Some(name) = &names.long {
            self.by_long.insert(name.clone(), idx);
        }
        if let Some(c) = names.short {
            self.by_short.insert(c, idx);
        }

        let descriptor = OptionDescriptor::new(names, default, description);
        debug!(
            short = ?descriptor.short(),
            long = ?descriptor.long(),
            kind = ?descriptor.kind(),
            "registered option"
        );
        self.options.push(descriptor);
        Ok(OptionId(idx))
    }

    pub fn by_letter(&self, c: char) -> Option<OptionId> {
        self.by_short.get(&c).copied().map(OptionId)
    }

    pub fn by_name(&self, name: &str) -> Option<OptionId> {
        self.by_long.get(name).copied().map(OptionId)
    }

    pub fn lookup(&self, key: &OptionKey) -> Option<OptionId> {
        match key {
            OptionKey::Short(c) => self.by_letter(*c),
            OptionKey::Long(name) => self.by_name(name),
        }
    }

    pub fn get(&self, id: OptionId) -> &OptionDescriptor {
        &self.options[id.0]
    }

    pub(crate) fn set(&mut self, id: OptionId, value: OptionValue) {
        let opt = &mut self.options[id.0];
        debug_assert_eq!(opt.kind(), value.kind());
        opt.value = value;
    }

    /// Put every option back to its registration-time default.
    pub(crate) fn restore_defaults(&mut self) {
        for opt in &mut self.options {
            opt.value = opt.default.clone();
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &OptionDescriptor> {
        self.options.iter()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}
