use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum Error {
    #[error("could not register image `{id}`, maybe the path or data is wrong")]
    /// The canvas could not read or identify an image
    AssetRegistration {
        id: String,
        #[source]
        source: image::ImageError,
    },

    #[error("invalid table configuration: {0}")]
    /// Grid sizes do not line up with the row they describe
    InvalidConfiguration(String),

    #[error(transparent)]
    /// An encoded image payload was not valid base64
    Decode(#[from] base64::DecodeError),

    #[error("no font registered for family `{family}` ({style:?})")]
    /// A text span refers to a font that was never added to the [FontBook](crate::FontBook)
    FontMissing {
        family: String,
        style: crate::FontStyle,
    },

    #[error("image `{0}` was drawn but never registered")]
    /// An image was drawn by identifier without being registered first
    AssetMissing(String),

    #[error("page is missing from the document")]
    /// The page order refers to a page that no longer exists
    PageMissing,

    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsing(#[from] owned_ttf_parser::FaceParsingError),

    #[error(transparent)]
    /// [image] failed to parse or encode the image
    Image(#[from] image::ImageError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
