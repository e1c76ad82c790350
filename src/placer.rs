//! Registering images with a [Canvas] and drawing them inside grid cells.
//!
//! In-memory images are identified by a hash of their decoded bytes, so the
//! same picture placed many times is only embedded once and no bookkeeping
//! outlives the document being rendered.

use crate::canvas::Canvas;
use crate::image::{AssetHandle, Extension};
use crate::layout::{anchored_placement, centered_placement};
use crate::props::RectProps;
use crate::rect::Cell;
use crate::{Error, Result};
use base64::Engine;
use sha2::{Digest, Sha256};
use std::fmt::Write;
use std::path::Path;

/// Identifier an in-memory image is registered under
pub fn asset_id(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    let mut id = String::with_capacity(7 + digest.len() * 2);
    id.push_str("sha256:");
    for b in digest {
        let _ = write!(&mut id, "{b:02x}");
    }
    id
}

/// Register the image at `path` and draw it inside `cell`
pub fn add_from_file<C, P>(canvas: &mut C, path: P, cell: &Cell, props: &RectProps) -> Result<()>
where
    C: Canvas + ?Sized,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let handle = canvas.register_asset(path).map_err(|source| {
        log::warn!("could not register image {}: {source}", path.display());
        Error::AssetRegistration {
            id: path.display().to_string(),
            source,
        }
    })?;
    draw(canvas, &handle, cell, props)
}

/// Decode a base64 `payload`, register the bytes and draw the image inside `cell`.
/// `extension` names the format of the decoded bytes.
pub fn add_from_encoded<C>(
    canvas: &mut C,
    payload: &str,
    cell: &Cell,
    props: &RectProps,
    extension: Extension,
) -> Result<()>
where
    C: Canvas + ?Sized,
{
    let bytes = base64::engine::general_purpose::STANDARD.decode(payload.trim())?;
    let id = asset_id(&bytes);
    let handle = canvas
        .register_asset_from_bytes(&id, extension, &bytes)
        .map_err(|source| {
            log::warn!("could not register encoded {} image: {source}", extension.as_str());
            Error::AssetRegistration { id, source }
        })?;
    draw(canvas, &handle, cell, props)
}

fn draw<C: Canvas + ?Sized>(canvas: &mut C, handle: &AssetHandle, cell: &Cell, props: &RectProps) -> Result<()> {
    let mut props = *props;
    props.make_valid();

    let placement = if props.center {
        centered_placement(handle.width(), handle.height(), cell, props.percent)
    } else {
        anchored_placement(handle.width(), handle.height(), cell, &props)
    };
    log::trace!("placing `{}` at {placement:?} in {cell:?}", handle.id);

    // placement math works in cell-local vertical space
    canvas.draw_asset(&handle.id, placement.offset_y(cell.y))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn asset_ids_are_stable_content_hashes() {
        let a = asset_id(b"hello");
        assert_eq!(a, asset_id(b"hello"));
        assert_ne!(a, asset_id(b"hellp"));
        assert_eq!(
            a,
            "sha256:2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }
}
