use std::thread;

use uuid::Uuid;

use catalog_api::domain::product::{
    Currency, Dimensions, DimensionsPatch, NewProduct, ProductListQuery, Seller, SortOrder,
    UpdateProduct,
};
use catalog_api::repository::errors::RepositoryError;
use catalog_api::repository::{ProductReader, ProductWriter};

mod common;

fn sample_new_product(sku: &str, name: &str, price: f64) -> NewProduct {
    NewProduct {
        sku: sku.to_string(),
        name: name.to_string(),
        description: "Integration fixture".to_string(),
        category: "electronics".to_string(),
        brand: "Xiaomi".to_string(),
        price,
        currency: Currency::Pkr,
        discount_percent: 0,
        stock: 5,
        is_active: true,
        rating: 4.5,
        tags: None,
        image_urls: vec!["https://example.com/p.png".to_string()],
        dimensions_cm: Dimensions {
            length: 2.0,
            width: 3.0,
            height: 4.0,
        },
        seller: Seller {
            seller_id: Uuid::new_v4(),
            seller_name: "Mi Store".to_string(),
            seller_email: "support@gmail.com".to_string(),
            seller_website: "https://www.xiaomi.com".to_string(),
        },
    }
}

#[test]
fn test_product_repository_crud() {
    let store = common::TestStore::new();
    let repo = store.repo();

    let created = repo
        .create_product(sample_new_product(
            "XIAO-359GB-001",
            "Xiaomi Model Pro",
            2000.0,
        ))
        .unwrap();
    assert_eq!(created.sku, "XIAO-359GB-001");

    let fetched = repo
        .get_product_by_id(created.id)
        .unwrap()
        .expect("created product should exist");
    assert_eq!(fetched, created);

    let updated = repo
        .update_product(
            created.id,
            &UpdateProduct {
                price: Some(1800.0),
                ..UpdateProduct::default()
            },
        )
        .unwrap();
    assert_eq!(updated.price, 1800.0);
    assert_eq!(updated.name, "Xiaomi Model Pro");
    assert_eq!(updated.created_at, created.created_at);

    let deleted = repo.delete_product(created.id).unwrap();
    assert_eq!(deleted.id, created.id);
    assert_eq!(deleted.price, 1800.0);
    assert!(repo.get_product_by_id(created.id).unwrap().is_none());

    let err = repo
        .delete_product(created.id)
        .expect_err("expected second delete to fail");
    assert!(matches!(err, RepositoryError::NotFound));
}

#[test]
fn test_duplicate_sku_is_rejected_and_set_unchanged() {
    let store = common::TestStore::new();
    let repo = store.repo();

    repo.create_product(sample_new_product("KB-MECH-001", "Mechanical Keyboard", 120.0))
        .unwrap();

    let err = repo
        .create_product(sample_new_product("KB-MECH-001", "Another Keyboard", 90.0))
        .expect_err("expected duplicate SKU to fail");
    assert!(matches!(err, RepositoryError::DuplicateSku(sku) if sku == "KB-MECH-001"));

    let (total, items) = repo.list_products(ProductListQuery::new()).unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].name, "Mechanical Keyboard");
}

#[test]
fn test_list_filters_sorts_and_paginates() {
    let store = common::TestStore::new();
    let repo = store.repo();

    for (sku, name, price) in [
        ("COF-ARA-001", "Arabica Coffee", 30.0),
        ("COF-ROB-002", "Robusta Coffee", 10.0),
        ("TEA-GRE-003", "Green Tea", 20.0),
        ("COF-BLE-004", "House Blend Coffee", 25.0),
    ] {
        repo.create_product(sample_new_product(sku, name, price))
            .unwrap();
    }

    let (total, items) = repo
        .list_products(ProductListQuery::new().search("coffee"))
        .unwrap();
    assert_eq!(total, 3);
    assert_eq!(items.len(), 3);

    let (total, items) = repo
        .list_products(
            ProductListQuery::new()
                .search("coffee")
                .sort_by_price(SortOrder::Asc)
                .limit(2),
        )
        .unwrap();
    assert_eq!(total, 3, "total counts every match, not the returned page");
    let names: Vec<&str> = items.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Robusta Coffee", "House Blend Coffee"]);

    let (_, items) = repo
        .list_products(
            ProductListQuery::new()
                .sort_by_price(SortOrder::Desc)
                .offset(1)
                .limit(2),
        )
        .unwrap();
    let prices: Vec<f64> = items.iter().map(|p| p.price).collect();
    assert_eq!(prices, [25.0, 20.0]);

    let (total, items) = repo.list_products(ProductListQuery::new()).unwrap();
    assert_eq!(total, 4);
    assert_eq!(items[0].name, "Arabica Coffee", "insertion order kept when unsorted");

    let (total, items) = repo
        .list_products(ProductListQuery::new().search("chocolate"))
        .unwrap();
    assert_eq!(total, 0);
    assert!(items.is_empty());
}

#[test]
fn test_missing_data_file_reads_as_empty() {
    let store = common::TestStore::new();
    let repo = store.repo();

    let (total, items) = repo.list_products(ProductListQuery::new()).unwrap();
    assert_eq!(total, 0);
    assert!(items.is_empty());
    assert!(repo.get_product_by_id(Uuid::new_v4()).unwrap().is_none());
}

#[test]
fn test_corrupted_data_file_is_reported() {
    let store = common::TestStore::new();
    std::fs::write(store.data_path(), b"{ not json").unwrap();
    let repo = store.repo();

    let err = repo
        .list_products(ProductListQuery::new())
        .expect_err("expected corrupted file to fail");
    assert!(matches!(err, RepositoryError::Corrupted(_)));
}

#[test]
fn test_update_violating_rules_leaves_record_unchanged() {
    let store = common::TestStore::new();
    let repo = store.repo();

    let created = repo
        .create_product(sample_new_product("PHN-PRO-005", "Pro Phone", 900.0))
        .unwrap();

    // stock drops to 0 while is_active stays true
    let err = repo
        .update_product(
            created.id,
            &UpdateProduct {
                stock: Some(0),
                ..UpdateProduct::default()
            },
        )
        .expect_err("expected rule violation to fail");
    assert!(matches!(err, RepositoryError::Rule(_)));

    let stored = repo
        .get_product_by_id(created.id)
        .unwrap()
        .expect("record should still exist");
    assert_eq!(stored, created);
}

#[test]
fn test_update_merges_nested_and_replaces_lists() {
    let store = common::TestStore::new();
    let repo = store.repo();

    let created = repo
        .create_product(sample_new_product("PHN-PRO-006", "Pro Phone", 900.0))
        .unwrap();

    let updated = repo
        .update_product(
            created.id,
            &UpdateProduct {
                tags: Some(vec!["sale".to_string()]),
                dimensions_cm: Some(DimensionsPatch {
                    height: Some(9.0),
                    ..DimensionsPatch::default()
                }),
                ..UpdateProduct::default()
            },
        )
        .unwrap();

    assert_eq!(updated.dimensions_cm.length, 2.0);
    assert_eq!(updated.dimensions_cm.width, 3.0);
    assert_eq!(updated.dimensions_cm.height, 9.0);
    assert_eq!(updated.tags, Some(vec!["sale".to_string()]));
    assert_eq!(updated.seller, created.seller);
}

#[test]
fn test_catalog_survives_reopening_the_store() {
    let store = common::TestStore::new();

    let created = store
        .repo()
        .create_product(sample_new_product("CAM-DSL-007", "DSLR Camera", 450.0))
        .unwrap();

    let reopened = store.repo();
    let fetched = reopened
        .get_product_by_id(created.id)
        .unwrap()
        .expect("record should survive reopening");
    assert_eq!(fetched, created);

    let raw = std::fs::read_to_string(store.data_path()).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert!(parsed.is_array());
    assert_eq!(parsed.as_array().map(Vec::len), Some(1));
}

#[test]
fn test_concurrent_creates_are_all_persisted() {
    let store = common::TestStore::new();
    let repo = store.repo();

    let handles: Vec<_> = (0..8)
        .map(|index| {
            let repo = repo.clone();
            thread::spawn(move || {
                repo.create_product(sample_new_product(
                    &format!("THR-CRE-{index:03}"),
                    &format!("Threaded Item {index}"),
                    10.0 + f64::from(index),
                ))
            })
        })
        .collect();

    for handle in handles {
        handle
            .join()
            .expect("create thread panicked")
            .expect("create should succeed");
    }

    let (total, items) = repo.list_products(ProductListQuery::new()).unwrap();
    assert_eq!(total, 8, "every writer's record survives");

    let mut skus: Vec<String> = items.into_iter().map(|product| product.sku).collect();
    skus.sort();
    let expected: Vec<String> = (0..8).map(|index| format!("THR-CRE-{index:03}")).collect();
    assert_eq!(skus, expected);
}

#[test]
fn test_concurrent_updates_keep_both_writes() {
    let store = common::TestStore::new();
    let repo = store.repo();

    let created = repo
        .create_product(sample_new_product("PHN-PRO-008", "Pro Phone", 900.0))
        .unwrap();
    let product_id = created.id;

    let price_repo = repo.clone();
    let price_update = thread::spawn(move || {
        price_repo.update_product(
            product_id,
            &UpdateProduct {
                price: Some(750.0),
                ..UpdateProduct::default()
            },
        )
    });

    let category_repo = repo.clone();
    let category_update = thread::spawn(move || {
        category_repo.update_product(
            product_id,
            &UpdateProduct {
                category: Some("refurbished".to_string()),
                ..UpdateProduct::default()
            },
        )
    });

    price_update
        .join()
        .expect("price thread panicked")
        .expect("price update should succeed");
    category_update
        .join()
        .expect("category thread panicked")
        .expect("category update should succeed");

    // Whichever update runs second starts from the first one's result.
    let stored = repo
        .get_product_by_id(product_id)
        .unwrap()
        .expect("record should exist");
    assert_eq!(stored.price, 750.0);
    assert_eq!(stored.category, "refurbished");
}
