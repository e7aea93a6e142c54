//! Archive input trees and their flattening into ordered entries.

use crate::error::{Result, ZipError};
use crate::zip::time::ZipDateTime;
use crate::zip::Compression;
use indexmap::IndexMap;
use std::collections::HashSet;

/// Per-entry options; unset fields fall back to the archive defaults.
#[derive(Debug, Clone, Default)]
pub struct EntryOptions {
    pub compression: Option<Compression>,
    /// Compression level 0..=9 for deflated entries.
    pub level: Option<u8>,
    /// Memory level 0..=12 for deflated entries.
    pub mem: Option<u8>,
    pub mtime: Option<ZipDateTime>,
    pub comment: Option<String>,
    /// Extra fields by id; each payload is stored verbatim.
    pub extra: IndexMap<u16, Vec<u8>>,
    /// OS byte of version-made-by.
    pub os: Option<u8>,
    /// 32-bit external attributes.
    pub attrs: Option<u32>,
}

impl EntryOptions {
    /// Field-wise merge with `self` winning over `base`.
    pub(crate) fn merged_over(&self, base: &EntryOptions) -> EntryOptions {
        EntryOptions {
            compression: self.compression.or(base.compression),
            level: self.level.or(base.level),
            mem: self.mem.or(base.mem),
            mtime: self.mtime.or(base.mtime),
            comment: self.comment.clone().or_else(|| base.comment.clone()),
            extra: if self.extra.is_empty() {
                base.extra.clone()
            } else {
                self.extra.clone()
            },
            os: self.os.or(base.os),
            attrs: self.attrs.or(base.attrs),
        }
    }
}

/// Input tree for [`zip`](crate::zip::write::zip). Directory maps keep
/// insertion order, which becomes the archive's entry order. Keys may
/// contain `/`; intermediate directories are synthesized once.
pub enum ZipTree {
    /// File payload.
    File(Vec<u8>),
    /// Directory of child nodes.
    Dir(IndexMap<String, ZipTree>),
    /// Node whose options override the archive defaults.
    With(Box<ZipTree>, EntryOptions),
}

impl ZipTree {
    /// Empty directory, usable as an archive root.
    pub fn root() -> Self {
        ZipTree::Dir(IndexMap::new())
    }

    pub fn file(data: impl Into<Vec<u8>>) -> Self {
        ZipTree::File(data.into())
    }

    /// Wrap this node with per-entry options.
    pub fn with_options(self, opts: EntryOptions) -> Self {
        ZipTree::With(Box::new(self), opts)
    }

    /// Add a child under a directory node (looking through option
    /// wrappers). Has no effect on file nodes.
    pub fn insert(&mut self, name: impl Into<String>, node: ZipTree) -> &mut Self {
        match self {
            ZipTree::Dir(map) => {
                map.insert(name.into(), node);
            }
            ZipTree::With(inner, _) => {
                inner.insert(name, node);
            }
            ZipTree::File(_) => {
                debug_assert!(false, "insert into a file node");
            }
        }
        self
    }
}

#[derive(Debug)]
pub(crate) struct FlatEntry<'a> {
    pub path: String,
    pub data: &'a [u8],
    pub opts: EntryOptions,
    pub is_dir: bool,
}

fn resolve<'a>(mut node: &'a ZipTree, mut opts: EntryOptions) -> (&'a ZipTree, EntryOptions) {
    while let ZipTree::With(inner, o) = node {
        opts = o.merged_over(&opts);
        node = inner;
    }
    (node, opts)
}

fn emit_dir<'a>(
    path: &str,
    opts: &EntryOptions,
    out: &mut Vec<FlatEntry<'a>>,
    seen_dirs: &mut HashSet<String>,
) {
    if seen_dirs.insert(path.to_string()) {
        out.push(FlatEntry {
            path: path.to_string(),
            data: &[],
            opts: opts.clone(),
            is_dir: true,
        });
    }
}

fn walk_dir<'a>(
    map: &'a IndexMap<String, ZipTree>,
    prefix: &str,
    inherited: &EntryOptions,
    out: &mut Vec<FlatEntry<'a>>,
    seen_files: &mut HashSet<String>,
    seen_dirs: &mut HashSet<String>,
) -> Result<()> {
    for (key, node) in map {
        let (node, opts) = resolve(node, inherited.clone());
        let comps: Vec<&str> = key.split('/').filter(|c| !c.is_empty()).collect();
        if comps.is_empty() {
            return Err(ZipError::InvalidParam("empty path in archive tree"));
        }
        let mut path = String::from(prefix);
        for comp in &comps[..comps.len() - 1] {
            path.push_str(comp);
            path.push('/');
            emit_dir(&path, inherited, out, seen_dirs);
        }
        let leaf = comps[comps.len() - 1];
        match node {
            ZipTree::File(data) => {
                path.push_str(leaf);
                if !seen_files.insert(path.clone()) {
                    return Err(ZipError::DuplicatePath { path });
                }
                out.push(FlatEntry {
                    path,
                    data,
                    opts,
                    is_dir: false,
                });
            }
            ZipTree::Dir(child) => {
                path.push_str(leaf);
                path.push('/');
                emit_dir(&path, &opts, out, seen_dirs);
                walk_dir(child, &path, inherited, out, seen_files, seen_dirs)?;
            }
            ZipTree::With(..) => unreachable!("option wrappers resolved above"),
        }
    }
    Ok(())
}

/// Collapse the tree into ordered entries with effective options.
pub(crate) fn flatten<'a>(
    tree: &'a ZipTree,
    defaults: &EntryOptions,
) -> Result<Vec<FlatEntry<'a>>> {
    let (root, base) = resolve(tree, defaults.clone());
    let map = match root {
        ZipTree::Dir(map) => map,
        _ => return Err(ZipError::InvalidParam("archive root must be a directory")),
    };
    let mut out = Vec::new();
    let mut seen_files = HashSet::new();
    let mut seen_dirs = HashSet::new();
    walk_dir(map, "", &base, &mut out, &mut seen_files, &mut seen_dirs)?;
    Ok(out)
}
