//! Naming and listing rules for hosted map files.
//!
//! Objects are stored as `maps/<uuid>__<name>.map`, where `<name>` is the
//! uploader's file name in unpadded URL-safe base64. The uuid is the map id
//! and the encoded part round-trips the original name, including non-ASCII
//! characters, without relying on storage metadata.

use crate::models::MapFile;
use crate::supabase::{StorageObject, MAPS_FOLDER};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::path::Path;
use uuid::Uuid;

pub const MAX_MAP_BYTES: usize = 100 * 1024 * 1024;
const ID_SEPARATOR: &str = "__";
const KEY_SUFFIX: &str = ".map";
const FALLBACK_NAME: &str = "map.map";

// RFC 5987 attr-char minus the alphanumerics.
const ATTR_CHAR: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'!')
    .remove(b'#')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b'-')
    .remove(b'.')
    .remove(b'^')
    .remove(b'_')
    .remove(b'`')
    .remove(b'|')
    .remove(b'~');

pub fn is_map_file(name: &str) -> bool {
    Path::new(name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("map"))
}

/// The uploader's name as shown back to users: last path component, control
/// characters removed.
pub fn display_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base.chars().filter(|c| !c.is_control()).collect();
    let cleaned = cleaned.trim();
    if cleaned.trim_matches('.').is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        cleaned.to_string()
    }
}

/// ASCII-only stand-in for clients that ignore `filename*`.
pub fn ascii_fallback(name: &str) -> String {
    let cleaned: String = display_name(name)
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.trim_matches(['.', '_']).is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        cleaned
    }
}

pub fn content_disposition(name: &str) -> String {
    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        ascii_fallback(name),
        utf8_percent_encode(&display_name(name), ATTR_CHAR)
    )
}

pub fn object_name(id: Uuid, original_name: &str) -> String {
    let encoded = URL_SAFE_NO_PAD.encode(display_name(original_name));
    format!("{id}{ID_SEPARATOR}{encoded}{KEY_SUFFIX}")
}

pub fn storage_path(object_name: &str) -> String {
    format!("{MAPS_FOLDER}/{object_name}")
}

/// Splits an object name into `(id, original name)`. Names not written by
/// this service fall back to the file stem as id and the raw name.
pub fn split_object_name(name: &str) -> (String, String) {
    if let Some((id, rest)) = name.split_once(ID_SEPARATOR) {
        if !id.is_empty() && !rest.is_empty() {
            let original = decode_name(rest).unwrap_or_else(|| rest.to_string());
            return (id.to_string(), original);
        }
    }
    let stem = Path::new(name)
        .file_stem()
        .map_or_else(|| name.to_string(), |s| s.to_string_lossy().into_owned());
    (stem, name.to_string())
}

fn decode_name(encoded: &str) -> Option<String> {
    let encoded = encoded.strip_suffix(KEY_SUFFIX)?;
    let bytes = URL_SAFE_NO_PAD.decode(encoded).ok()?;
    String::from_utf8(bytes).ok()
}

pub fn to_map_file(object: &StorageObject) -> MapFile {
    let (id, original_name) = split_object_name(&object.name);
    MapFile {
        id,
        original_name,
        storage_path: storage_path(&object.name),
        file_size: object.size(),
        uploaded_at: object.created_at.clone().unwrap_or_default(),
    }
}

pub fn list_files(objects: &[StorageObject]) -> Vec<MapFile> {
    objects
        .iter()
        .filter(|object| object.is_file())
        .map(to_map_file)
        .collect()
}

pub fn find_by_id<'a>(objects: &'a [StorageObject], id: &str) -> Option<&'a StorageObject> {
    objects
        .iter()
        .filter(|object| object.is_file())
        .find(|object| split_object_name(&object.name).0 == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(name: &str, size: u64) -> StorageObject {
        serde_json::from_value(json!({
            "name": name,
            "created_at": "2026-01-05T10:00:00Z",
            "metadata": { "size": size },
        }))
        .unwrap()
    }

    #[test]
    fn only_map_extension_is_accepted() {
        assert!(is_map_file("de_dust.map"));
        assert!(is_map_file("ARENA.MAP"));
        assert!(!is_map_file("arena.map.zip"));
        assert!(!is_map_file("map"));
        assert!(!is_map_file("notes.txt"));
    }

    #[test]
    fn display_name_strips_paths_and_control_characters() {
        assert_eq!(display_name("../../etc/big arena.map"), "big arena.map");
        assert_eq!(display_name("C:\\maps\\ночь.map"), "ночь.map");
        assert_eq!(display_name("bad\nname.map"), "badname.map");
        assert_eq!(display_name(".."), "map.map");
    }

    #[test]
    fn object_names_keep_the_original_name() {
        let id = Uuid::new_v4();
        let night = object_name(id, "ночь.map");
        let day = object_name(id, "день.map");
        assert_ne!(split_object_name(&night).1, split_object_name(&day).1);
        assert_eq!(split_object_name(&night), (id.to_string(), "ночь.map".to_string()));
        assert_eq!(
            split_object_name(&object_name(id, "Arena v2.map")).1,
            "Arena v2.map"
        );
        assert!(night.ends_with(".map"));
        assert!(night.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')));
    }

    #[test]
    fn foreign_object_names_fall_back_to_the_raw_name() {
        assert_eq!(
            split_object_name("legacy.map"),
            ("legacy".to_string(), "legacy.map".to_string())
        );
        assert_eq!(
            split_object_name("abc__arena.map"),
            ("abc".to_string(), "arena.map".to_string())
        );
    }

    #[test]
    fn content_disposition_carries_ascii_and_utf8_names() {
        assert_eq!(
            content_disposition("ночь.map"),
            "attachment; filename=\"____.map\"; filename*=UTF-8''%D0%BD%D0%BE%D1%87%D1%8C.map"
        );
        assert_eq!(
            content_disposition("big arena.map"),
            "attachment; filename=\"big_arena.map\"; filename*=UTF-8''big%20arena.map"
        );
    }

    #[test]
    fn listing_skips_placeholders_and_finds_by_id() {
        let placeholder: StorageObject =
            serde_json::from_value(json!({ "name": "old", "metadata": null })).unwrap();
        let objects = vec![placeholder, object("abc__arena.map", 512), object("legacy.map", 64)];

        let files = list_files(&objects);
        assert_eq!(files.len(), 2);
        assert_eq!(
            files[0],
            MapFile {
                id: "abc".to_string(),
                original_name: "arena.map".to_string(),
                storage_path: "maps/abc__arena.map".to_string(),
                file_size: 512,
                uploaded_at: "2026-01-05T10:00:00Z".to_string(),
            }
        );
        assert_eq!(find_by_id(&objects, "legacy").map(|o| o.name.as_str()), Some("legacy.map"));
        assert!(find_by_id(&objects, "old").is_none());
    }
}
