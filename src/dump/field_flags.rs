//! Field flags reported in a field dump.
//!
//! The `FieldFlags:` line of a dump carries the raw `/Ff` integer of the field
//! dictionary (ISO 32000-1:2008 Section 12.7.3). Bits 1-3 are shared by every
//! field type; the remaining bits only mean something for a particular type.

use bitflags::bitflags;

bitflags! {
    /// Field flags across all field types.
    ///
    /// Per PDF spec Tables 221, 226, 228 and 230.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FieldFlags: u32 {
        // --- Common flags (bits 1-3) ---
        /// Bit 1: Field is read-only; user cannot change the value
        const READ_ONLY = 1 << 0;
        /// Bit 2: Field is required; must have a value before submit
        const REQUIRED = 1 << 1;
        /// Bit 3: Field should not be exported by submit-form action
        const NO_EXPORT = 1 << 2;

        // --- Text fields ---
        /// Bit 13: Text may include multiple lines
        const MULTILINE = 1 << 12;
        /// Bit 14: Text should be displayed as asterisks
        const PASSWORD = 1 << 13;
        /// Bit 21: File path should be submitted as field value
        const FILE_SELECT = 1 << 20;
        /// Bit 24: Text should not scroll beyond visible area
        const DO_NOT_SCROLL = 1 << 23;
        /// Bit 25: Field is divided into equally spaced positions
        const COMB = 1 << 24;
        /// Bit 26: Field contains rich text
        const RICH_TEXT = 1 << 25;

        // --- Button fields ---
        /// Bit 15: At least one radio button in the group must be on
        const NO_TOGGLE_TO_OFF = 1 << 14;
        /// Bit 16: Radio button
        const RADIO = 1 << 15;
        /// Bit 17: Push button
        const PUSHBUTTON = 1 << 16;
        /// Bit 26: Radio buttons with the same on-state turn on together
        const RADIOS_IN_UNISON = 1 << 25;

        // --- Choice fields ---
        /// Bit 18: Combo box; list box otherwise
        const COMBO = 1 << 17;
        /// Bit 19: Combo box accepts custom text
        const EDIT = 1 << 18;
        /// Bit 20: Options are sorted
        const SORT = 1 << 19;
        /// Bit 22: More than one option may be selected
        const MULTI_SELECT = 1 << 21;
        /// Bit 23: Text should not be spell-checked
        const DO_NOT_SPELL_CHECK = 1 << 22;
        /// Bit 27: Commit value as soon as the selection changes
        const COMMIT_ON_SEL_CHANGE = 1 << 26;
    }
}

impl Default for FieldFlags {
    fn default() -> Self {
        Self::empty()
    }
}

impl FieldFlags {
    /// Interpret the raw `FieldFlags:` text of a dump.
    ///
    /// The first whitespace-separated token is read as an unsigned integer.
    /// Bits without a named flag are retained. Empty or non-numeric text
    /// yields the empty set.
    pub fn from_dump(raw: &str) -> Self {
        raw.split_whitespace()
            .next()
            .and_then(|token| token.parse::<u32>().ok())
            .map(Self::from_bits_retain)
            .unwrap_or_default()
    }
}
