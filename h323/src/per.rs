//! Aligned-PER codec machinery: bit cursors, primitive encodings, and the
//! structural algorithms the generated message types compose.

pub mod reader;
pub mod sink;
pub mod types;
pub mod writer;

pub use reader::{PerReader, Position};
pub use sink::{EventSink, TraceSink};
pub use types::{
    BitString, ChoiceTag, CodecOption, CodecOptions, ObjectId, OptionalBits, RawExtension,
    SizeConstraint,
};
pub use writer::{ExtensionAdditions, PerWriter};

/// The canonical NumericString alphabet, in index order.
pub const NUMERIC_ALPHABET: &str = " 0123456789";

/// Define an extensible CHOICE whose root alternatives are all NULL, plus
/// the reserved unknown-extension variant. The message schemas use this for
/// the many reason/option enumeration-like choices.
macro_rules! null_choice {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq)]
        pub enum $name {
            $($variant,)+
            Unknown(crate::per::RawExtension),
        }

        impl $name {
            const ROOTS: &'static [Self] = &[$($name::$variant),+];

            pub fn decode(
                r: &mut crate::per::PerReader<'_, '_>,
            ) -> crate::error::Result<Self> {
                let num_root = Self::ROOTS.len() as u32;
                match r.read_choice_header(num_root, true)? {
                    crate::per::ChoiceTag::Root(index) => {
                        r.read_null()?;
                        Self::ROOTS
                            .get(index as usize)
                            .cloned()
                            .ok_or_else(|| {
                                r.error(crate::error::ErrorKind::InvalidChoiceIndex)
                            })
                    }
                    crate::per::ChoiceTag::Extension(index) => {
                        let data = r.skip_open_type()?;
                        Ok($name::Unknown(crate::per::RawExtension { index, data }))
                    }
                }
            }

            pub fn encode(
                &self,
                w: &mut crate::per::PerWriter,
            ) -> crate::error::Result<()> {
                if let $name::Unknown(ext) = self {
                    w.write_choice_extension(ext.index)?;
                    return w.write_open_type(&ext.data);
                }
                let num_root = Self::ROOTS.len() as u32;
                let index = Self::ROOTS
                    .iter()
                    .position(|v| v == self)
                    .ok_or_else(|| w.error(crate::error::ErrorKind::InvalidChoiceIndex))?;
                w.write_choice_root(index as u32, num_root, true)?;
                w.write_null()
            }
        }
    };
}

pub(crate) use null_choice;
