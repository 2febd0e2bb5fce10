// Template persistence: the on-disk document format and the keyed store.
//
// Templates persist as pretty-printed JSON documents:
//
// ```json
// {
//   "size": [5, 4, 5],
//   "block_count": 2,
//   "blocks": [
//     { "pos": [0, 0, 0], "name": "minecraft:cobblestone" },
//     { "pos": [1, 0, 0], "name": "minecraft:oak_stairs", "props": { "facing": "east" } }
//   ],
//   "meta": { "scanned_from": [10, 64, 10], "scanned_to": [14, 67, 14] }
// }
// ```
//
// `block_count` is redundant with `blocks.len()` and exists so a reader can
// sanity-check a document without trusting it; a mismatch fails the load.
// Loading validates structure fully — sizes positive, every position inside
// the bounding box — before a `Template` is handed to callers, so templates
// in memory are always well-formed.
//
// Keys resolve to `<dir>/<key>.json` unless the key is an absolute path,
// which is used as-is.
//
// See also: `template.rs` for the in-memory type, `error.rs` for the
// `TemplateNotFound` / `MalformedTemplate` split.

use crate::block::BlockRecord;
use crate::error::{Error, Result};
use crate::template::{Template, TemplateMeta};
use crate::types::BlockPos;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Document shape
// ---------------------------------------------------------------------------

#[derive(Serialize, Deserialize)]
struct TemplateDoc {
    size: [i32; 3],
    block_count: usize,
    blocks: Vec<BlockRecord>,
    meta: MetaDoc,
}

#[derive(Serialize, Deserialize)]
struct MetaDoc {
    scanned_from: [i32; 3],
    scanned_to: [i32; 3],
}

fn to_doc(template: &Template) -> TemplateDoc {
    TemplateDoc {
        size: template.size,
        block_count: template.entries.len(),
        blocks: template
            .entries
            .iter()
            .map(|(pos, spec)| BlockRecord::from_parts(*pos, spec))
            .collect(),
        meta: MetaDoc {
            scanned_from: [
                template.meta.scanned_from.x,
                template.meta.scanned_from.y,
                template.meta.scanned_from.z,
            ],
            scanned_to: [
                template.meta.scanned_to.x,
                template.meta.scanned_to.y,
                template.meta.scanned_to.z,
            ],
        },
    }
}

fn from_doc(doc: TemplateDoc) -> Result<Template> {
    let [sx, sy, sz] = doc.size;
    if sx < 1 || sy < 1 || sz < 1 {
        return Err(Error::malformed(format!(
            "non-positive size [{sx}, {sy}, {sz}]"
        )));
    }
    if doc.block_count != doc.blocks.len() {
        return Err(Error::malformed(format!(
            "block_count {} does not match {} block entries",
            doc.block_count,
            doc.blocks.len()
        )));
    }

    let mut entries = Vec::with_capacity(doc.blocks.len());
    for record in doc.blocks {
        let (pos, spec) = record.into_parts();
        if pos.x < 0 || pos.x >= sx || pos.y < 0 || pos.y >= sy || pos.z < 0 || pos.z >= sz {
            return Err(Error::malformed(format!(
                "block at {pos} outside size [{sx}, {sy}, {sz}]"
            )));
        }
        entries.push((pos, spec));
    }

    let [fx, fy, fz] = doc.meta.scanned_from;
    let [tx, ty, tz] = doc.meta.scanned_to;
    Ok(Template {
        size: doc.size,
        entries,
        meta: TemplateMeta {
            scanned_from: BlockPos::new(fx, fy, fz),
            scanned_to: BlockPos::new(tx, ty, tz),
        },
    })
}

// ---------------------------------------------------------------------------
// The store
// ---------------------------------------------------------------------------

/// One row of [`TemplateStore::list`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TemplateSummary {
    pub key: String,
    pub size: [i32; 3],
    pub block_count: usize,
}

/// A directory of template documents, addressed by key.
#[derive(Clone, Debug)]
pub struct TemplateStore {
    dir: PathBuf,
}

impl TemplateStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The file a key resolves to. Absolute-path keys bypass the store
    /// directory entirely.
    pub fn resolve(&self, key: &str) -> PathBuf {
        let key_path = Path::new(key);
        if key_path.is_absolute() {
            return key_path.to_path_buf();
        }
        if key.ends_with(".json") {
            self.dir.join(key)
        } else {
            self.dir.join(format!("{key}.json"))
        }
    }

    /// Serialize a template under `key`. Creates the store directory if
    /// needed. Returns the path written.
    pub fn save(&self, key: &str, template: &Template) -> Result<PathBuf> {
        let path = self.resolve(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut json = serde_json::to_string_pretty(&to_doc(template))?;
        json.push('\n');
        fs::write(&path, json)?;
        log::debug!("saved template '{key}' to {}", path.display());
        Ok(path)
    }

    /// Load and validate the template stored under `key`.
    pub fn load(&self, key: &str) -> Result<Template> {
        let path = self.resolve(key);
        if !path.exists() {
            return Err(Error::TemplateNotFound {
                key: key.to_string(),
            });
        }
        let text = fs::read_to_string(&path)?;
        let doc: TemplateDoc =
            serde_json::from_str(&text).map_err(|e| Error::malformed(e.to_string()))?;
        from_doc(doc)
    }

    /// Summaries of every readable template in the store directory, sorted
    /// by key. Unreadable documents are skipped with a warning; a missing
    /// directory is an empty store.
    pub fn list(&self) -> Result<Vec<TemplateSummary>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut paths: Vec<PathBuf> = fs::read_dir(&self.dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .collect();
        paths.sort();

        let mut summaries = Vec::new();
        for path in paths {
            let Some(key) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let parsed = fs::read_to_string(&path)
                .map_err(Error::from)
                .and_then(|text| {
                    serde_json::from_str::<TemplateDoc>(&text)
                        .map_err(|e| Error::malformed(e.to_string()))
                });
            match parsed {
                Ok(doc) => summaries.push(TemplateSummary {
                    key: key.to_string(),
                    size: doc.size,
                    block_count: doc.block_count,
                }),
                Err(err) => log::warn!("skipping unreadable template {}: {err}", path.display()),
            }
        }
        Ok(summaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockSpec;
    use crate::world::{MemoryWorld, World};

    /// Fresh store under the system temp dir, emptied of prior runs.
    fn temp_store(name: &str) -> TemplateStore {
        let dir = std::env::temp_dir()
            .join("blockwright_store_tests")
            .join(name);
        let _ = fs::remove_dir_all(&dir);
        TemplateStore::new(dir)
    }

    fn sample_template() -> Template {
        let mut world = MemoryWorld::new();
        world.set(BlockPos::new(0, 0, 0), BlockSpec::new("cobblestone"));
        world.set(
            BlockPos::new(1, 0, 0),
            BlockSpec::new("oak_stairs").with_prop("facing", "east"),
        );
        world.set(BlockPos::new(1, 1, 2), BlockSpec::new("torch"));
        Template::capture(&world, BlockPos::new(0, 0, 0), BlockPos::new(2, 1, 2))
    }

    #[test]
    fn save_load_roundtrip_is_structural_identity() {
        let store = temp_store("roundtrip");
        let template = sample_template();
        store.save("stoop", &template).unwrap();
        let restored = store.load("stoop").unwrap();
        assert_eq!(restored, template);
    }

    #[test]
    fn missing_key_is_template_not_found() {
        let store = temp_store("missing");
        let err = store.load("no_such_thing").unwrap_err();
        assert!(matches!(err, Error::TemplateNotFound { key } if key == "no_such_thing"));
    }

    #[test]
    fn undecodable_json_is_malformed() {
        let store = temp_store("garbage");
        fs::create_dir_all(store.dir()).unwrap();
        fs::write(store.resolve("broken"), "{not json").unwrap();
        let err = store.load("broken").unwrap_err();
        assert!(matches!(err, Error::MalformedTemplate { .. }));
    }

    #[test]
    fn count_mismatch_is_malformed() {
        let store = temp_store("count_mismatch");
        fs::create_dir_all(store.dir()).unwrap();
        let doc = r#"{
            "size": [2, 1, 1],
            "block_count": 5,
            "blocks": [{ "pos": [0, 0, 0], "name": "minecraft:stone" }],
            "meta": { "scanned_from": [0, 0, 0], "scanned_to": [1, 0, 0] }
        }"#;
        fs::write(store.resolve("liar"), doc).unwrap();
        let err = store.load("liar").unwrap_err();
        assert!(
            matches!(err, Error::MalformedTemplate { ref reason } if reason.contains("block_count"))
        );
    }

    #[test]
    fn out_of_bounds_block_is_malformed() {
        let store = temp_store("oob");
        fs::create_dir_all(store.dir()).unwrap();
        let doc = r#"{
            "size": [2, 1, 1],
            "block_count": 1,
            "blocks": [{ "pos": [2, 0, 0], "name": "minecraft:stone" }],
            "meta": { "scanned_from": [0, 0, 0], "scanned_to": [1, 0, 0] }
        }"#;
        fs::write(store.resolve("escapee"), doc).unwrap();
        let err = store.load("escapee").unwrap_err();
        assert!(
            matches!(err, Error::MalformedTemplate { ref reason } if reason.contains("outside"))
        );
    }

    #[test]
    fn non_positive_size_is_malformed() {
        let store = temp_store("zero_size");
        fs::create_dir_all(store.dir()).unwrap();
        let doc = r#"{
            "size": [0, 1, 1],
            "block_count": 0,
            "blocks": [],
            "meta": { "scanned_from": [0, 0, 0], "scanned_to": [0, 0, 0] }
        }"#;
        fs::write(store.resolve("flatland"), doc).unwrap();
        let err = store.load("flatland").unwrap_err();
        assert!(matches!(err, Error::MalformedTemplate { .. }));
    }

    #[test]
    fn list_is_sorted_and_skips_unreadable_documents() {
        let store = temp_store("listing");
        let template = sample_template();
        store.save("zebra", &template).unwrap();
        store.save("aardvark", &template).unwrap();
        fs::write(store.resolve("broken"), "{not json").unwrap();
        fs::write(store.dir().join("notes.txt"), "not a template").unwrap();

        let summaries = store.list().unwrap();
        let keys: Vec<&str> = summaries.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, vec!["aardvark", "zebra"]);
        assert_eq!(summaries[0].size, template.size);
        assert_eq!(summaries[0].block_count, template.block_count());
    }

    #[test]
    fn list_of_missing_directory_is_empty() {
        let store = temp_store("never_created");
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn absolute_path_keys_bypass_the_directory() {
        let store = temp_store("absolute");
        let template = sample_template();
        let path = store.save("here", &template).unwrap();
        assert!(path.is_absolute());

        // A different store loads the same file through its absolute path.
        let elsewhere = TemplateStore::new("some/relative/dir");
        let restored = elsewhere.load(path.to_str().unwrap()).unwrap();
        assert_eq!(restored, template);
    }

    #[test]
    fn document_format_is_stable() {
        let store = temp_store("format");
        let template = sample_template();
        let path = store.save("pinned", &template).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();

        assert_eq!(value["size"], serde_json::json!([3, 2, 3]));
        assert_eq!(value["block_count"], serde_json::json!(3));
        assert_eq!(value["meta"]["scanned_from"], serde_json::json!([0, 0, 0]));
        assert_eq!(value["meta"]["scanned_to"], serde_json::json!([2, 1, 2]));
        let blocks = value["blocks"].as_array().unwrap();
        assert_eq!(blocks.len(), 3);
        // Bare blocks omit "props" entirely.
        assert!(blocks[0].get("props").is_none());
        assert_eq!(blocks[1]["props"]["facing"], serde_json::json!("east"));
    }
}
