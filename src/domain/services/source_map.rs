//! Source map rewriting
//!
//! The compiler records sources relative to its own view of the project. After
//! emitting, every map is pointed back at the original `.ts` file so debuggers
//! open the real source instead of a path that only made sense during compilation.

use std::path::Path;

use serde_json::Value;

use crate::domain::value_objects::{relative_path, to_slash};
use crate::error::{BuildError, BuildResult};

/// Rewrite the `sources` of the map at `map_path` so they reference `source`.
///
/// Both paths must be lexically normalized and share an anchor. `sourceRoot`
/// is cleared since the new entries are already relative to the map.
pub fn rewrite_sources(map_json: &str, map_path: &Path, source: &Path) -> BuildResult<String> {
    let mut map: Value = serde_json::from_str(map_json).map_err(|e| BuildError::SourceMap {
        path: map_path.to_path_buf(),
        message: e.to_string(),
    })?;

    let map_dir = map_path.parent().unwrap_or(Path::new(""));
    let reference = to_slash(&relative_path(map_dir, source));

    let Some(object) = map.as_object_mut() else {
        return Err(BuildError::SourceMap {
            path: map_path.to_path_buf(),
            message: "expected a JSON object".to_string(),
        });
    };

    let count = object
        .get("sources")
        .and_then(Value::as_array)
        .map_or(0, Vec::len)
        .max(1);
    object.insert(
        "sources".to_string(),
        Value::Array(vec![Value::String(reference); count]),
    );
    object.insert("sourceRoot".to_string(), Value::String(String::new()));

    serde_json::to_string(&map).map_err(|e| BuildError::SourceMap {
        path: map_path.to_path_buf(),
        message: e.to_string(),
    })
}
