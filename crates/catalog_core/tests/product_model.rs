use catalog_core::{NewProduct, Product, ProductPatch};
use serde_json::json;

#[test]
fn product_serializes_all_detail_fields() {
    let product = Product {
        id: 1,
        title: "Widget".to_string(),
        description: None,
        price: 9.99,
    };

    let value = serde_json::to_value(&product).unwrap();
    assert_eq!(
        value,
        json!({"id": 1, "title": "Widget", "description": null, "price": 9.99})
    );
}

#[test]
fn new_product_requires_title_and_price() {
    let missing_title = serde_json::from_value::<NewProduct>(json!({"price": 1.0})).unwrap_err();
    assert!(missing_title.to_string().contains("missing field `title`"));

    let missing_price = serde_json::from_value::<NewProduct>(json!({"title": "x"})).unwrap_err();
    assert!(missing_price.to_string().contains("missing field `price`"));

    let no_description =
        serde_json::from_value::<NewProduct>(json!({"title": "x", "price": 2})).unwrap();
    assert_eq!(no_description, NewProduct::new("x", None, 2.0));
}

#[test]
fn patch_distinguishes_absent_and_null_description() {
    let absent = serde_json::from_value::<ProductPatch>(json!({"price": 12.5})).unwrap();
    assert_eq!(absent.description, None);
    assert_eq!(absent.price, Some(12.5));

    let cleared = serde_json::from_value::<ProductPatch>(json!({"description": null})).unwrap();
    assert_eq!(cleared.description, Some(None));

    let empty = serde_json::from_value::<ProductPatch>(json!({})).unwrap();
    assert_eq!(empty, ProductPatch::default());
}

#[test]
fn patch_rejects_null_for_required_columns() {
    let err = serde_json::from_value::<ProductPatch>(json!({"title": null})).unwrap_err();
    assert!(err.to_string().contains("cannot be null"), "unexpected error: {err}");

    assert!(serde_json::from_value::<ProductPatch>(json!({"price": null})).is_err());
}

#[test]
fn apply_overwrites_only_present_fields() {
    let mut product = Product {
        id: 1,
        title: "A".to_string(),
        description: Some("d".to_string()),
        price: 1.0,
    };

    product.apply(&ProductPatch {
        title: Some("B".to_string()),
        ..ProductPatch::default()
    });

    assert_eq!(product.title, "B");
    assert_eq!(product.description.as_deref(), Some("d"));
    assert_eq!(product.price, 1.0);
}
