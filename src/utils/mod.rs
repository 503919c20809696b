//! Utilities for path collection and copying objects between documents.

use crate::{Result, error::PdfSpliceError};
use lopdf::{Document, Object, ObjectId};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Expand multiple glob patterns into filesystem paths.
///
/// Accepts anything iterable with items that convert to `&str`, e.g.:
/// `&[&str]`, `Vec<String>`, or `Vec<&str>`.
///
/// A pattern without glob metacharacters is kept as a literal path even
/// when nothing exists there, so a mistyped file name surfaces as a read
/// error instead of silently disappearing. Paths are returned in pattern
/// order; matches of a single pattern come back sorted.
///
/// Errors:
/// - Propagates `glob` parse errors.
/// - Propagates filesystem errors from glob iterator.
pub fn collect_paths_for_patterns<T>(patterns: T) -> Result<Vec<PathBuf>>
where
    T: IntoIterator,
    T::Item: AsRef<str>,
{
    let mut resolved_paths = Vec::new();

    for pattern in patterns.into_iter() {
        let pattern = pattern.as_ref();
        if is_literal(pattern) {
            resolved_paths.push(PathBuf::from(pattern));
        } else {
            resolved_paths.extend(collect_paths_for_pattern(pattern)?);
        }
    }

    Ok(resolved_paths)
}

fn is_literal(pattern: &str) -> bool {
    !pattern.contains(['*', '?', '['])
}

/// Make `paths` absolute against the current directory.
///
/// Tracked files and outputs are always stored absolute, so the same file
/// named two ways is tracked once.
pub fn absolute_paths<T>(paths: T) -> Result<Vec<PathBuf>>
where
    T: IntoIterator<Item = PathBuf>,
{
    paths
        .into_iter()
        .map(|path| std::path::absolute(&path).map_err(PdfSpliceError::from))
        .collect()
}

/// Expand a single glob pattern into filesystem paths.
///
/// Pattern examples:
/// - `"**/*.pdf"`
/// - `"./docs/*.pdf"`
fn collect_paths_for_pattern(pattern: &str) -> Result<Vec<PathBuf>> {
    let mut resolved_paths = Vec::new();

    let paths = glob::glob(pattern).map_err(|err| PdfSpliceError::other(err.to_string()))?;

    for entry in paths {
        let path = entry.map_err(|err| PdfSpliceError::other(err.to_string()))?;
        resolved_paths.push(path);
    }

    Ok(resolved_paths)
}

/// Copy object references from one PDF document to another.
///
/// If `obj` is a reference, this walks the structure recursively and inserts
/// missing referenced objects into the `target` document. Objects already in
/// `target` are not revisited, which also stops reference cycles. Ids in
/// `skip` are neither copied nor walked; references to them are left for the
/// caller to resolve.
pub fn copy_references(
    target: &mut Document,
    source: &Document,
    obj: &Object,
    skip: &BTreeSet<ObjectId>,
) {
    match obj {
        Object::Reference(ref_id) => {
            if !skip.contains(ref_id)
                && !target.objects.contains_key(ref_id)
                && let Ok(referenced_obj) = source.get_object(*ref_id)
            {
                target.objects.insert(*ref_id, referenced_obj.clone());
                copy_references(target, source, referenced_obj, skip);
            }
        }
        Object::Dictionary(dict) => {
            for (_, value) in dict.iter() {
                copy_references(target, source, value, skip);
            }
        }
        Object::Array(arr) => {
            for item in arr {
                copy_references(target, source, item, skip);
            }
        }
        Object::Stream(stream) => {
            for (_, value) in stream.dict.iter() {
                copy_references(target, source, value, skip);
            }
        }
        _ => {}
    }
}

/// Replace every reference to an id in `ids` with `null`, in place.
pub fn detach_references(obj: &mut Object, ids: &BTreeSet<ObjectId>) {
    match obj {
        Object::Reference(id) => {
            if ids.contains(id) {
                *obj = Object::Null;
            }
        }
        Object::Dictionary(dict) => {
            for (_, value) in dict.iter_mut() {
                detach_references(value, ids);
            }
        }
        Object::Array(arr) => {
            for item in arr.iter_mut() {
                detach_references(item, ids);
            }
        }
        Object::Stream(stream) => {
            for (_, value) in stream.dict.iter_mut() {
                detach_references(value, ids);
            }
        }
        _ => {}
    }
}
