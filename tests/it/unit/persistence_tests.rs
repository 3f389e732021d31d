//! Unit tests for the persisted block format.
//!
//! Snapshots pin the JSON shape other tools read. To update them after an
//! intentional format change:
//! ```sh
//! cargo insta test --accept
//! ```

use blockmark::geometry::Rect;
use blockmark::persistence::{PersistenceError, export_blocks, import_blocks};
use blockmark::store::BlockStore;
use blockmark::types::{Block, TableGrid};
use serde_json::Value;
use uuid::Uuid;

fn fixed_block() -> Block {
    let mut table = TableGrid::new(1, 2).unwrap();
    table.set_cell(0, 1, "total");
    Block {
        uid: Uuid::from_u128(1),
        page: 2,
        label: "summary".into(),
        x: 10.0,
        y: 20.0,
        width: 30.5,
        height: 40.0,
        table: Some(table),
    }
}

#[test]
fn snapshot_block_json() {
    let json = serde_json::to_string_pretty(&fixed_block()).unwrap();
    insta::assert_snapshot!(json, @r#"
{
  "uid": "00000000-0000-0000-0000-000000000001",
  "page": 2,
  "label": "summary",
  "x": 10.0,
  "y": 20.0,
  "width": 30.5,
  "height": 40.0,
  "table": {
    "rows": 1,
    "cols": 2,
    "data": [
      [
        "",
        "total"
      ]
    ]
  }
}
"#);
}

#[test]
fn snapshot_export_identity_fields() {
    let mut store = BlockStore::new();
    let first = store.create(2, Rect::new(0.0, 0.0, 5.0, 5.0), None).unwrap();
    let second = store.create(1, Rect::new(0.0, 0.0, 5.0, 5.0), Some("a".into())).unwrap();
    store.attach_table(second, 1, 1);
    assert_ne!(first, second);

    let mut exported: Value = serde_json::from_slice(&export_blocks(&store).unwrap()).unwrap();
    for block in exported.as_array_mut().unwrap() {
        let fields = block.as_object_mut().unwrap();
        for geometry in ["x", "y", "width", "height"] {
            assert!(fields.remove(geometry).is_some(), "missing {geometry}");
        }
    }

    insta::assert_json_snapshot!(exported, {"[].uid" => "[uid]"}, @r#"
[
  {
    "label": "a",
    "page": 1,
    "table": {
      "cols": 1,
      "data": [
        [
          ""
        ]
      ],
      "rows": 1
    },
    "uid": "[uid]"
  },
  {
    "label": "",
    "page": 2,
    "uid": "[uid]"
  }
]
"#);
}

#[test]
fn test_import_array_shape() {
    let json = serde_json::to_vec(&vec![fixed_block()]).unwrap();
    let store = import_blocks(&json).unwrap();
    assert_eq!(store.get(Uuid::from_u128(1)), Some(&fixed_block()));
}

#[test]
fn test_import_page_keyed_shape() {
    let payload = serde_json::json!({
        "2": [fixed_block()],
        "5": [{
            "uid": Uuid::from_u128(2),
            "x": 1.0, "y": 1.0, "width": 2.0, "height": 2.0
        }],
    });
    let store = import_blocks(payload.to_string().as_bytes()).unwrap();

    assert_eq!(store.len(), 2);
    assert_eq!(store.blocks_for_page(5)[0].uid, Uuid::from_u128(2));
    assert_eq!(store.blocks_for_page(5)[0].label, "");
}

#[test]
fn test_import_empty_collections() {
    assert!(import_blocks(b"[]").unwrap().is_empty());
    assert!(import_blocks(b"{}").unwrap().is_empty());
}

#[test]
fn test_import_rejects_inconsistent_table() {
    let mut value = serde_json::to_value(fixed_block()).unwrap();
    value["table"]["rows"] = Value::from(3);
    let payload = Value::Array(vec![value]).to_string();

    match import_blocks(payload.as_bytes()) {
        Err(PersistenceError::InvalidBlock { uid, reason }) => {
            assert_eq!(uid, Uuid::from_u128(1));
            assert!(reason.contains("table"), "{reason}");
        }
        other => panic!("expected InvalidBlock, got {other:?}"),
    }
}

#[test]
fn test_import_rejects_negative_origin() {
    let mut value = serde_json::to_value(fixed_block()).unwrap();
    value["x"] = Value::from(-4.0);
    let payload = Value::Array(vec![value]).to_string();
    assert!(matches!(
        import_blocks(payload.as_bytes()),
        Err(PersistenceError::InvalidBlock { .. })
    ));
}

#[test]
fn test_import_rejects_page_zero() {
    let mut value = serde_json::to_value(fixed_block()).unwrap();
    value["page"] = Value::from(0);
    let payload = Value::Array(vec![value]).to_string();
    assert!(import_blocks(payload.as_bytes()).is_err());
}

#[test]
fn test_import_rejects_non_numeric_page_key() {
    let payload = serde_json::json!({ "cover": [fixed_block()] });
    assert!(matches!(
        import_blocks(payload.to_string().as_bytes()),
        Err(PersistenceError::UnrecognizedShape(_))
    ));
}
