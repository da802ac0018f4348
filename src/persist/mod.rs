//! Save files
//!
//! A save is one subtree written depth-first as versioned line-oriented
//! text. Saving the Universe saves the world.

pub mod format;
pub mod reader;
pub mod writer;

use std::path::Path;

use crate::core::error::{MudError, Result};
use crate::core::types::ObjectId;
use crate::world::World;

pub use format::SAVE_VERSION;
pub use reader::{LoadTarget, SaveLoader};
pub use writer::SaveWriter;

/// Save text for `root` and everything it contains
pub fn save_subtree(world: &World, root: ObjectId) -> Result<String> {
    if !world.contains(root) {
        return Err(MudError::StaleObject(root));
    }
    let mut writer = SaveWriter::new(world);
    let text = writer.write(root);
    tracing::info!(
        %root,
        bytes = text.len(),
        dropped_links = writer.dropped_links(),
        "subtree saved"
    );
    Ok(text)
}

/// Save text for the Universe; the TrashBin is never saved
pub fn save_world(world: &World) -> Result<String> {
    save_subtree(world, world.universe())
}

/// Write a subtree to `path` in one piece
pub fn save_subtree_to_path(world: &World, root: ObjectId, path: &Path) -> Result<()> {
    let text = save_subtree(world, root)?;
    std::fs::write(path, text)?;
    Ok(())
}

pub fn save_world_to_path(world: &World, path: &Path) -> Result<()> {
    save_subtree_to_path(world, world.universe(), path)
}

/// Load a world save into the Universe of `world`
pub fn load_world(world: &mut World, text: &str) -> Result<ObjectId> {
    let universe = world.universe();
    SaveLoader::new(world).load_from_str(text, LoadTarget::Into(universe))
}

/// Load a subtree save as a new child of `parent`
pub fn load_subtree(world: &mut World, parent: ObjectId, text: &str) -> Result<ObjectId> {
    SaveLoader::new(world).load_from_str(text, LoadTarget::Under(parent))
}

pub fn load_world_from_path(world: &mut World, path: &Path) -> Result<ObjectId> {
    let universe = world.universe();
    SaveLoader::new(world).load_from_file(path, LoadTarget::Into(universe))
}

pub fn load_subtree_from_path(world: &mut World, parent: ObjectId, path: &Path) -> Result<ObjectId> {
    SaveLoader::new(world).load_from_file(path, LoadTarget::Under(parent))
}
