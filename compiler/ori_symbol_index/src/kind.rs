//! Declared symbol kinds.
//!
//! The byte value of each kind is written to persisted indexes, so every
//! variant carries an explicit discriminant. New kinds take the next free
//! value; existing values are never reused or renumbered without bumping
//! `batch::FORMAT_VERSION`.

use std::fmt;

/// What sort of declaration introduced a symbol.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum DeclaredSymbolKind {
    #[default]
    Class = 0,
    Constant = 1,
    Constructor = 2,
    Delegate = 3,
    Enum = 4,
    EnumMember = 5,
    Event = 6,
    Field = 7,
    Indexer = 8,
    Interface = 9,
    Method = 10,
    Module = 11,
    Property = 12,
    Struct = 13,
}

/// A byte that does not name any `DeclaredSymbolKind`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error(
    "invalid declared symbol kind byte {0} (expected 0..={max})",
    max = DeclaredSymbolKind::Struct as u8
)]
pub struct InvalidKind(pub u8);

impl DeclaredSymbolKind {
    /// Every kind, in byte order.
    pub const ALL: [DeclaredSymbolKind; 14] = [
        DeclaredSymbolKind::Class,
        DeclaredSymbolKind::Constant,
        DeclaredSymbolKind::Constructor,
        DeclaredSymbolKind::Delegate,
        DeclaredSymbolKind::Enum,
        DeclaredSymbolKind::EnumMember,
        DeclaredSymbolKind::Event,
        DeclaredSymbolKind::Field,
        DeclaredSymbolKind::Indexer,
        DeclaredSymbolKind::Interface,
        DeclaredSymbolKind::Method,
        DeclaredSymbolKind::Module,
        DeclaredSymbolKind::Property,
        DeclaredSymbolKind::Struct,
    ];

    /// The on-wire byte for this kind.
    #[inline]
    pub const fn as_byte(self) -> u8 {
        self as u8
    }

    /// Lowercase display name, as printed by `ori-symdump`.
    pub const fn as_str(self) -> &'static str {
        match self {
            DeclaredSymbolKind::Class => "class",
            DeclaredSymbolKind::Constant => "constant",
            DeclaredSymbolKind::Constructor => "constructor",
            DeclaredSymbolKind::Delegate => "delegate",
            DeclaredSymbolKind::Enum => "enum",
            DeclaredSymbolKind::EnumMember => "enum member",
            DeclaredSymbolKind::Event => "event",
            DeclaredSymbolKind::Field => "field",
            DeclaredSymbolKind::Indexer => "indexer",
            DeclaredSymbolKind::Interface => "interface",
            DeclaredSymbolKind::Method => "method",
            DeclaredSymbolKind::Module => "module",
            DeclaredSymbolKind::Property => "property",
            DeclaredSymbolKind::Struct => "struct",
        }
    }
}

impl TryFrom<u8> for DeclaredSymbolKind {
    type Error = InvalidKind;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(byte))
            .copied()
            .ok_or(InvalidKind(byte))
    }
}

impl From<DeclaredSymbolKind> for u8 {
    fn from(kind: DeclaredSymbolKind) -> u8 {
        kind.as_byte()
    }
}

impl fmt::Display for DeclaredSymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
