//! Option list editing for select, checkbox and radio fields

use super::error::{FormError, FormResult};
use super::field::{Field, FieldType};

/// Auto-generated option text for the `n`th option (1-based)
pub fn placeholder_option(n: usize) -> String {
    format!("Option {n}")
}

impl Field {
    fn ensure_options(&self) -> FormResult<()> {
        if self.field_type.has_options() {
            Ok(())
        } else {
            Err(FormError::OptionsNotSupported(self.field_type))
        }
    }

    fn check_index(&self, index: usize) -> FormResult<()> {
        if index < self.options.len() {
            Ok(())
        } else {
            Err(FormError::IndexOutOfRange {
                index,
                len: self.options.len(),
            })
        }
    }

    /// Append an option and return its index.
    ///
    /// Blank input becomes `"Option N"` for checkbox and radio fields and is
    /// rejected for dropdowns. Non-blank input is kept verbatim.
    pub fn append_option(&mut self, value: &str) -> FormResult<usize> {
        self.ensure_options()?;

        let option = if !value.trim().is_empty() {
            value.to_string()
        } else if self.field_type == FieldType::Select {
            return Err(FormError::BlankOption);
        } else {
            placeholder_option(self.options.len() + 1)
        };

        self.options.push(option);
        Ok(self.options.len() - 1)
    }

    /// Overwrite the option at `index`, leaving the rest untouched
    pub fn replace_option_at(&mut self, index: usize, value: &str) -> FormResult<()> {
        self.ensure_options()?;
        self.check_index(index)?;
        self.options[index] = value.to_string();
        Ok(())
    }

    /// Remove the option at `index`, shifting later options left
    pub fn remove_option_at(&mut self, index: usize) -> FormResult<String> {
        self.ensure_options()?;
        self.check_index(index)?;
        Ok(self.options.remove(index))
    }
}
