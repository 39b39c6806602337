//! Shared value and constraint types for the PER machinery.

bitflags! {
    /// Options which influence decoding of a PER bitstream.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct CodecOption : u8 {
        /// Reject values of a root enumeration that fall outside the set of
        /// named values. When unset, such values are surfaced as-is.
        const STRICT_ENUM = 0b1;

        /// Retain the raw container bytes of unknown extension additions on
        /// the decoded value. When unset, unknown additions are skipped and
        /// their bytes discarded.
        const PRESERVE_UNKNOWN_EXTENSIONS = 0b10;
    }
}

/// Options controlling decode behavior. `Default` enables strict
/// enumerations, preserves unknown extensions, and bounds nesting at 32.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CodecOptions {
    pub flags: CodecOption,
    /// Nesting limit for open types and recursive value trees. Exceeding it
    /// fails the decode with `ConstraintViolation`.
    pub max_recursion_depth: u32,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            flags: CodecOption::STRICT_ENUM | CodecOption::PRESERVE_UNKNOWN_EXTENSIONS,
            max_recursion_depth: 32,
        }
    }
}

impl CodecOptions {
    pub fn strict_enum(&self) -> bool {
        self.flags.contains(CodecOption::STRICT_ENUM)
    }

    pub fn preserve_unknown_extensions(&self) -> bool {
        self.flags.contains(CodecOption::PRESERVE_UNKNOWN_EXTENSIONS)
    }
}

/// A size constraint pending on a cursor.
///
/// The constraint is transient: it is set immediately before decoding or
/// encoding one sized type and consumed by the next length determinant.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SizeConstraint {
    pub lower: usize,
    pub upper: usize,
    /// The constraint carries an extension marker; lengths outside the root
    /// range are legal and travel in the general form.
    pub extensible: bool,
}

impl SizeConstraint {
    pub fn new(lower: usize, upper: usize, extensible: bool) -> Self {
        Self {
            lower,
            upper,
            extensible,
        }
    }

    /// A constraint pinning the size to exactly `size`.
    pub fn fixed(size: usize) -> Self {
        Self::new(size, size, false)
    }

    /// A plain `SIZE(lower..upper)` range.
    pub fn range(lower: usize, upper: usize) -> Self {
        Self::new(lower, upper, false)
    }

    pub fn is_fixed(&self) -> bool {
        self.lower == self.upper && !self.extensible
    }
}

/// The presence mask read from a SEQUENCE's root optional-bit prefix.
///
/// Bit 0 corresponds to the first declared root optional field.
#[derive(Copy, Clone, Debug)]
pub struct OptionalBits {
    bits: u64,
    count: u32,
}

impl OptionalBits {
    pub(crate) fn new(bits: u64, count: u32) -> Self {
        Self { bits, count }
    }

    /// Whether the `index`-th declared root optional field is present.
    pub fn get(&self, index: u32) -> bool {
        index < self.count && (self.bits >> (self.count - 1 - index)) & 1 == 1
    }
}

/// The alternative selected by a CHOICE header.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ChoiceTag {
    /// A root alternative, 0-based in declaration order.
    Root(u32),
    /// An extension addition, 0-based from the extension marker.
    Extension(u32),
}

/// An extension addition that the schema in use does not know.
///
/// `index` is the 0-based position in the extension-addition bitmap (for
/// SEQUENCE) or the 0-based extension index (for CHOICE); `data` is the
/// undecoded open-type container payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawExtension {
    pub index: u32,
    pub data: Vec<u8>,
}

/// A BIT STRING value: packed bytes plus a bit count.
///
/// Bits are stored most-significant-bit first; unused trailing bits of the
/// final byte are zero.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct BitString {
    pub data: Vec<u8>,
    pub length: usize,
}

impl BitString {
    pub fn new(data: Vec<u8>, length: usize) -> Self {
        debug_assert!(data.len() == (length + 7) / 8);
        Self { data, length }
    }
}

/// An OBJECT IDENTIFIER value as a sequence of arcs.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ObjectId {
    pub arcs: Vec<u32>,
}

impl ObjectId {
    pub fn new(arcs: Vec<u32>) -> Self {
        Self { arcs }
    }
}

impl From<&[u32]> for ObjectId {
    fn from(arcs: &[u32]) -> Self {
        Self {
            arcs: arcs.to_vec(),
        }
    }
}
