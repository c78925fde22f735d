//! Field flags of interactive PDF form fields.
//!
//! Per ISO 32000-1:2008 Section 12.7.3. Only the bits the backend reads to
//! classify fields and describe them in schemas are listed.

use bitflags::bitflags;

bitflags! {
    /// Text field flags (field type Tx).
    ///
    /// Per PDF spec Table 228 (Field flags specific to text fields).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TextFieldFlags: u32 {
        /// Bit 2: Field is required
        const REQUIRED = 1 << 1;
        /// Bit 13: Text may include multiple lines
        const MULTILINE = 1 << 12;
        /// Bit 25: Field is divided into equally spaced positions (comb)
        const COMB = 1 << 24;
    }
}

bitflags! {
    /// Button field flags (field type Btn).
    ///
    /// Per PDF spec Table 226 (Field flags specific to button fields).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ButtonFieldFlags: u32 {
        /// Bit 16: Radio button (otherwise checkbox)
        const RADIO = 1 << 15;
        /// Bit 17: Push button
        const PUSHBUTTON = 1 << 16;
    }
}

bitflags! {
    /// Choice field flags (field type Ch).
    ///
    /// Per PDF spec Table 230 (Field flags specific to choice fields).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ChoiceFieldFlags: u32 {
        /// Bit 18: Combo box (otherwise list box)
        const COMBO = 1 << 17;
        /// Bit 22: More than one item may be selected
        const MULTI_SELECT = 1 << 21;
    }
}
