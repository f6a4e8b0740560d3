use catalog_core::db::migrations::latest_version;
use catalog_core::db::{open_db_in_memory, DbError};
use catalog_core::{
    NewProduct, Product, ProductPatch, ProductRepository, ProductService,
    ProductValidationError, RepoError, SqliteProductRepository,
};
use rusqlite::Connection;

fn widget() -> NewProduct {
    NewProduct::new("Widget", Some("A widget".to_string()), 9.99)
}

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteProductRepository::try_new(&conn).unwrap();

    let id = repo.create_product(&widget()).unwrap();

    let loaded = repo.get_product(id).unwrap().unwrap();
    assert_eq!(
        loaded,
        Product {
            id,
            title: "Widget".to_string(),
            description: Some("A widget".to_string()),
            price: 9.99,
        }
    );
}

#[test]
fn create_without_description_stores_null() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteProductRepository::try_new(&conn).unwrap();

    let id = repo
        .create_product(&NewProduct::new("Bare", None, 1.0))
        .unwrap();

    let description: Option<String> = conn
        .query_row(
            "SELECT description FROM products WHERE id = ?1;",
            [id],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(description, None);
}

#[test]
fn ids_are_distinct_and_not_reused_after_delete() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteProductRepository::try_new(&conn).unwrap();

    let first = repo.create_product(&widget()).unwrap();
    let second = repo.create_product(&widget()).unwrap();
    assert_ne!(first, second);

    repo.delete_product(second).unwrap();
    let third = repo.create_product(&widget()).unwrap();
    assert!(third > second);
}

#[test]
fn list_returns_summaries_in_id_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteProductRepository::try_new(&conn).unwrap();

    let a = repo
        .create_product(&NewProduct::new("A", Some("alpha".to_string()), 1.0))
        .unwrap();
    let b = repo
        .create_product(&NewProduct::new("B", None, 2.5))
        .unwrap();

    let listed = repo.list_products().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, a);
    assert_eq!(listed[0].title, "A");
    assert_eq!(listed[1].id, b);
    assert_eq!(listed[1].price, 2.5);

    let json = serde_json::to_value(&listed[0]).unwrap();
    assert!(json.get("description").is_none());
}

#[test]
fn list_on_empty_store_is_empty() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteProductRepository::try_new(&conn).unwrap();

    assert!(repo.list_products().unwrap().is_empty());
}

#[test]
fn update_and_delete_missing_return_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteProductRepository::try_new(&conn).unwrap();

    let ghost = Product {
        id: 404,
        title: "ghost".to_string(),
        description: None,
        price: 0.0,
    };
    assert!(matches!(
        repo.update_product(&ghost).unwrap_err(),
        RepoError::NotFound(404)
    ));
    assert!(matches!(
        repo.delete_product(404).unwrap_err(),
        RepoError::NotFound(404)
    ));
    assert!(repo.get_product(404).unwrap().is_none());
}

#[test]
fn validation_failure_blocks_create_and_update() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteProductRepository::try_new(&conn).unwrap();

    let create_err = repo
        .create_product(&NewProduct::new("", None, 1.0))
        .unwrap_err();
    assert!(matches!(
        create_err,
        RepoError::Validation(ProductValidationError::EmptyTitle)
    ));

    let id = repo.create_product(&widget()).unwrap();
    let mut product = repo.get_product(id).unwrap().unwrap();
    product.title = "x".repeat(101);
    let update_err = repo.update_product(&product).unwrap_err();
    assert!(matches!(
        update_err,
        RepoError::Validation(ProductValidationError::TitleTooLong { len: 101, max: 100 })
    ));
}

#[test]
fn service_partial_update_keeps_unspecified_fields() {
    let conn = open_db_in_memory().unwrap();
    let service = ProductService::new(SqliteProductRepository::try_new(&conn).unwrap());

    let id = service
        .create_product(&NewProduct::new("A", Some("d".to_string()), 1.0))
        .unwrap();

    let patch = ProductPatch {
        price: Some(2.0),
        ..ProductPatch::default()
    };
    let updated = service.update_product(id, &patch).unwrap();
    assert_eq!(updated.price, 2.0);

    let loaded = service.get_product(id).unwrap();
    assert_eq!(loaded.title, "A");
    assert_eq!(loaded.description.as_deref(), Some("d"));
    assert_eq!(loaded.price, 2.0);
}

#[test]
fn service_update_can_clear_description() {
    let conn = open_db_in_memory().unwrap();
    let service = ProductService::new(SqliteProductRepository::try_new(&conn).unwrap());

    let id = service.create_product(&widget()).unwrap();
    let patch = ProductPatch {
        description: Some(None),
        ..ProductPatch::default()
    };
    service.update_product(id, &patch).unwrap();

    assert_eq!(service.get_product(id).unwrap().description, None);
}

#[test]
fn service_reports_not_found_for_missing_ids() {
    let conn = open_db_in_memory().unwrap();
    let service = ProductService::new(SqliteProductRepository::try_new(&conn).unwrap());

    assert!(matches!(
        service.get_product(9).unwrap_err(),
        RepoError::NotFound(9)
    ));
    assert!(matches!(
        service.update_product(9, &ProductPatch::default()).unwrap_err(),
        RepoError::NotFound(9)
    ));
    assert!(matches!(
        service.delete_product(9).unwrap_err(),
        RepoError::NotFound(9)
    ));
}

#[test]
fn service_delete_then_get_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = ProductService::new(SqliteProductRepository::try_new(&conn).unwrap());

    let id = service.create_product(&widget()).unwrap();
    service.delete_product(id).unwrap();

    assert!(matches!(
        service.get_product(id).unwrap_err(),
        RepoError::NotFound(found) if found == id
    ));
    assert!(service.list_products().unwrap().is_empty());
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteProductRepository::try_new(&conn) {
        Err(RepoError::Db(DbError::Uninitialized {
            expected_version,
            actual_version: 0,
        })) => assert_eq!(expected_version, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_products_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteProductRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::Db(DbError::MissingTable("products")))
    ));
}

#[test]
fn rows_written_without_field_rules_read_back_in_list_and_detail() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteProductRepository::try_new(&conn).unwrap();

    let long_title = "x".repeat(150);
    conn.execute(
        "INSERT INTO products (title, description, price) VALUES (?1, NULL, 1.0);",
        [long_title.as_str()],
    )
    .unwrap();
    let id = conn.last_insert_rowid();

    let loaded = repo.get_product(id).unwrap().unwrap();
    assert_eq!(loaded.title, long_title);

    let listed = repo.list_products().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].title, long_title);
}
