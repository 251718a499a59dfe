use std::fs;
use std::io;
use std::path::Path;

use arena_rbtree::RbTree;

/// Inserts every integer of `text` into `tree`, one at a time. Integers are
/// separated by whitespace and/or commas. Malformed tokens and keys already
/// present are skipped with a warning. Returns the number of keys inserted.
pub(crate) fn seed_from_str(tree: &mut RbTree<i64>, text: &str) -> usize {
    let mut inserted = 0;
    for token in text.split(|c: char| c.is_whitespace() || c == ',').filter(|token| !token.is_empty()) {
        let key = match token.parse::<i64>() {
            Ok(key) => key,
            Err(error) => {
                log::warn!("skipping `{token}`: {error}");
                continue;
            }
        };
        match tree.insert(key) {
            Ok(_) => inserted += 1,
            Err(error) => log::warn!("skipping {key}: {error}"),
        }
    }
    inserted
}

/// Reads `path` and seeds `tree` with its integers.
pub(crate) fn seed_from_file(tree: &mut RbTree<i64>, path: &Path) -> io::Result<usize> {
    let text = fs::read_to_string(path)?;
    let inserted = seed_from_str(tree, &text);
    log::info!("inserted {inserted} keys from {}", path.display());
    Ok(inserted)
}
