//! End-to-end tests of query/mutation execution against the catalog
//! engine, from request to serialized response.

use std::sync::Arc;

use {
    async_graphql_parser as _, async_graphql_value as _, catalog_registry as _,
    catalog_store as _, indexmap as _, serde as _, thiserror as _, tracing as _,
};

use catalog_engine::{Engine, ProductDraft, ProductStore, Request, Variables};

fn empty_engine() -> Engine {
    Engine::new(Arc::new(ProductStore::new())).unwrap()
}

/// The three records the original catalog ships with, ids 1 through 3.
fn seeded_engine() -> Engine {
    let store = Arc::new(ProductStore::new());
    store.insert(ProductDraft {
        name: "Chicha Morada".to_string(),
        info: "Chicha morada is a beverage originated in the Andean regions of Perú but is actually consumed at a national level (wiki)".to_string(),
        price: 7.99,
    });
    store.insert(ProductDraft {
        name: "Chicha de jora".to_string(),
        info: "Chicha de jora is a corn beer chicha prepared by germinating maize, extracting the malt sugars, boiling the wort, and fermenting it in large vessels (traditionally huge earthenware vats) for several days (wiki)".to_string(),
        price: 5.95,
    });
    store.insert(ProductDraft {
        name: "Pisco".to_string(),
        info: "Pisco is a colorless or yellowish-to-amber colored brandy produced in winemaking regions of Peru and Chile (wiki)".to_string(),
        price: 9.95,
    });
    Engine::new(store).unwrap()
}

async fn execute(engine: &Engine, query: &str) -> serde_json::Value {
    let response = engine.execute(Request::new(query)).await;
    serde_json::to_value(&response).unwrap()
}

#[tokio::test]
async fn listing_names_returns_them_in_insertion_order() {
    let engine = seeded_engine();

    insta::assert_json_snapshot!(
        execute(&engine, "{ list { name } }").await,
        @r###"
    {
      "data": {
        "list": [
          {
            "name": "Chicha Morada"
          },
          {
            "name": "Chicha de jora"
          },
          {
            "name": "Pisco"
          }
        ]
      }
    }
    "###
    );
}

#[tokio::test]
async fn create_then_lookup_round_trips_the_record() {
    let engine = empty_engine();

    let created = execute(
        &engine,
        r#"mutation { create(name: "Inca Kola", info: "soft drink", price: 1.99) { id name info price } }"#,
    )
    .await;
    assert_eq!(created["errors"], serde_json::Value::Null);
    let id = created["data"]["create"]["id"].as_i64().unwrap();

    let found = execute(&engine, &format!("{{ product(id: {id}) {{ id name info price }} }}")).await;
    assert_eq!(
        found["data"]["product"],
        serde_json::json!({ "id": id, "name": "Inca Kola", "info": "soft drink", "price": 1.99 })
    );
}

#[tokio::test]
async fn unrequested_fields_stay_out_of_the_result_tree() {
    let engine = seeded_engine();

    let value = execute(&engine, "{ product(id: 3) { name price } }").await;
    assert_eq!(
        value["data"]["product"],
        serde_json::json!({ "name": "Pisco", "price": 9.95 })
    );
}

#[tokio::test]
async fn aliases_rename_the_response_keys() {
    let engine = seeded_engine();

    insta::assert_json_snapshot!(
        execute(
            &engine,
            "{ first: product(id: 1) { name } second: product(id: 2) { name } }"
        )
        .await,
        @r###"
    {
      "data": {
        "first": {
          "name": "Chicha Morada"
        },
        "second": {
          "name": "Chicha de jora"
        }
      }
    }
    "###
    );
}

#[tokio::test]
async fn partial_update_touches_only_the_supplied_fields() {
    let engine = seeded_engine();

    let value = execute(
        &engine,
        "mutation { update(id: 1, price: 3.95) { id name info price } }",
    )
    .await;
    let updated = &value["data"]["update"];
    assert_eq!(updated["name"], "Chicha Morada");
    assert_eq!(updated["price"], 3.95);
    assert!(updated["info"].as_str().unwrap().starts_with("Chicha morada"));
}

#[tokio::test]
async fn delete_removes_the_record_from_lookup_and_list() {
    let engine = seeded_engine();

    let value = execute(&engine, "mutation { delete(id: 2) { name } }").await;
    assert_eq!(value["data"]["delete"]["name"], "Chicha de jora");

    let value = execute(&engine, "{ product(id: 2) { name } list { id } }").await;
    assert_eq!(value["data"]["product"], serde_json::Value::Null);
    assert_eq!(
        value["data"]["list"],
        serde_json::json!([{ "id": 1 }, { "id": 3 }])
    );
    assert_eq!(value["errors"], serde_json::Value::Null);
}

#[tokio::test]
async fn an_unknown_top_level_field_fails_alone() {
    let engine = seeded_engine();

    let value = execute(&engine, "{ list { name } catalog { name } }").await;
    assert_eq!(value["data"]["list"].as_array().unwrap().len(), 3);
    assert_eq!(value["data"]["catalog"], serde_json::Value::Null);

    let errors = value["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0]["message"],
        "Query does not have a field named 'catalog'."
    );
    assert_eq!(errors[0]["path"], serde_json::json!(["catalog"]));
}

#[tokio::test]
async fn an_argument_type_mismatch_leaves_the_store_unchanged() {
    let engine = empty_engine();

    let value = execute(
        &engine,
        r#"mutation { create(name: "X", price: "not-a-number") { id } }"#,
    )
    .await;
    assert_eq!(value["data"]["create"], serde_json::Value::Null);

    let errors = value["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0]["message"],
        "Found a String value where we expected a Float scalar"
    );
    assert_eq!(errors[0]["path"], serde_json::json!(["create"]));

    assert!(engine.store().is_empty());
}

#[tokio::test]
async fn missing_required_arguments_fail_the_field() {
    let engine = empty_engine();

    let value = execute(&engine, r#"mutation { create(name: "X") { id } }"#).await;
    assert_eq!(value["data"]["create"], serde_json::Value::Null);
    assert_eq!(
        value["errors"][0]["message"],
        "Missing required argument 'price'."
    );
    assert!(engine.store().is_empty());
}

#[tokio::test]
async fn variables_feed_arguments_through_coercion() {
    let engine = empty_engine();

    let variables = Variables::from_json(serde_json::json!({
        "name": "Inca Kola",
        "price": 1.99,
    }));
    let request = Request::new(
        "mutation Create($name: String!, $price: Float!) { create(name: $name, price: $price) { name info price } }",
    )
    .with_variables(variables);
    let response = engine.execute(request).await;
    let value = serde_json::to_value(&response).unwrap();

    assert_eq!(
        value["data"]["create"],
        serde_json::json!({ "name": "Inca Kola", "info": "", "price": 1.99 })
    );
}

#[tokio::test]
async fn a_missing_variable_for_a_required_argument_fails_the_field() {
    let engine = empty_engine();

    let value = execute(
        &engine,
        "mutation { create(name: $name, price: 1.0) { id } }",
    )
    .await;
    assert_eq!(value["data"]["create"], serde_json::Value::Null);
    assert_eq!(value["errors"][0]["message"], "Unknown variable $name");
    assert!(engine.store().is_empty());
}

#[tokio::test]
async fn mutations_apply_in_document_order() {
    let engine = empty_engine();

    let value = execute(
        &engine,
        r#"mutation {
            first: create(name: "a", price: 1.0) { id }
            second: create(name: "b", price: 2.0) { id }
        }"#,
    )
    .await;
    assert_eq!(value["data"]["first"]["id"], 1);
    assert_eq!(value["data"]["second"]["id"], 2);

    let keys: Vec<&str> = value["data"]
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys, vec!["first", "second"]);
}

#[tokio::test]
async fn updating_an_unknown_id_yields_the_zero_value_product() {
    let engine = seeded_engine();

    let value = execute(
        &engine,
        "mutation { update(id: 99, price: 1.0) { id name info price } }",
    )
    .await;
    assert_eq!(
        value["data"]["update"],
        serde_json::json!({ "id": 0, "name": "", "info": "", "price": 0.0 })
    );
    assert_eq!(value["errors"], serde_json::Value::Null);
}

#[tokio::test]
async fn deleting_an_unknown_id_yields_the_zero_value_product() {
    let engine = seeded_engine();

    let value = execute(&engine, "mutation { delete(id: 99) { id name } }").await;
    assert_eq!(
        value["data"]["delete"],
        serde_json::json!({ "id": 0, "name": "" })
    );
    assert_eq!(engine.store().len(), 3);
}

#[tokio::test]
async fn an_explicit_null_clears_the_optional_info_field() {
    let engine = seeded_engine();

    let value = execute(&engine, "mutation { update(id: 3, info: null) { name info } }").await;
    assert_eq!(
        value["data"]["update"],
        serde_json::json!({ "name": "Pisco", "info": "" })
    );
}

#[tokio::test]
async fn an_explicit_null_cannot_clear_a_required_field() {
    let engine = seeded_engine();

    let value = execute(&engine, "mutation { update(id: 3, name: null) { name } }").await;
    assert_eq!(value["data"]["update"], serde_json::Value::Null);
    assert_eq!(
        value["errors"][0]["message"],
        "Product name cannot be set to null."
    );

    let value = execute(&engine, "{ product(id: 3) { name } }").await;
    assert_eq!(value["data"]["product"]["name"], "Pisco");
}

#[tokio::test]
async fn blank_names_are_rejected_on_create_and_update() {
    let engine = seeded_engine();

    let value = execute(&engine, r#"mutation { create(name: "  ", price: 1.0) { id } }"#).await;
    assert_eq!(value["errors"][0]["message"], "Product name cannot be empty.");
    assert_eq!(engine.store().len(), 3);

    let value = execute(&engine, r#"mutation { update(id: 1, name: "") { id } }"#).await;
    assert_eq!(value["errors"][0]["message"], "Product name cannot be empty.");
}

#[tokio::test]
async fn an_unknown_sub_field_nulls_only_its_own_slot() {
    let engine = seeded_engine();

    let value = execute(&engine, "{ product(id: 1) { name barcode } }").await;
    assert_eq!(
        value["data"]["product"],
        serde_json::json!({ "name": "Chicha Morada", "barcode": null })
    );

    let errors = value["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0]["message"],
        "Type 'Product' does not have a field named 'barcode'."
    );
    assert_eq!(errors[0]["path"], serde_json::json!(["product", "barcode"]));
}

#[tokio::test]
async fn sub_field_errors_inside_lists_carry_the_element_index() {
    let engine = seeded_engine();

    let value = execute(&engine, "{ list { barcode } }").await;
    let errors = value["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 3);
    assert_eq!(errors[0]["path"], serde_json::json!(["list", 0, "barcode"]));
    assert_eq!(errors[2]["path"], serde_json::json!(["list", 2, "barcode"]));
}

#[tokio::test]
async fn selecting_sub_fields_on_a_scalar_is_an_error() {
    let engine = seeded_engine();

    let value = execute(&engine, "{ product(id: 1) { name { length } } }").await;
    assert_eq!(
        value["data"]["product"],
        serde_json::json!({ "name": null })
    );
    assert_eq!(
        value["errors"][0]["message"],
        "Field 'name' does not have any fields."
    );
}

#[tokio::test]
async fn object_fields_require_a_selection_of_subfields() {
    let engine = seeded_engine();

    let value = execute(&engine, "{ product(id: 1) }").await;
    assert_eq!(value["data"]["product"], serde_json::Value::Null);
    assert_eq!(
        value["errors"][0]["message"],
        "Field 'product' of type 'Product' must have a selection of subfields."
    );
}

#[tokio::test]
async fn a_product_lookup_without_an_id_resolves_to_null() {
    let engine = seeded_engine();

    let value = execute(&engine, "{ product { name } }").await;
    assert_eq!(value["data"]["product"], serde_json::Value::Null);
    assert_eq!(value["errors"], serde_json::Value::Null);
}

#[tokio::test]
async fn an_unparsable_document_fails_the_whole_request() {
    let engine = seeded_engine();

    let response = engine.execute(Request::new("{ list { name ")).await;
    assert!(response.data.is_none());
    assert_eq!(response.errors.len(), 1);
    assert!(!response.errors[0].locations.is_empty());
}

#[tokio::test]
async fn subscriptions_are_rejected() {
    let engine = seeded_engine();

    let value = execute(&engine, "subscription { list { name } }").await;
    assert_eq!(value["data"], serde_json::Value::Null);
    assert_eq!(value["errors"][0]["message"], "Subscriptions are not supported.");
}

#[tokio::test]
async fn fragments_are_rejected_per_spread() {
    let engine = seeded_engine();

    let value = execute(
        &engine,
        "{ list { name } ... on Query { list { name } } }",
    )
    .await;
    assert_eq!(value["data"]["list"].as_array().unwrap().len(), 3);
    assert_eq!(value["errors"][0]["message"], "Fragments are not supported.");
}

#[tokio::test]
async fn unknown_arguments_fail_the_field() {
    let engine = seeded_engine();

    let value = execute(&engine, "{ product(identifier: 1) { name } }").await;
    assert_eq!(value["data"]["product"], serde_json::Value::Null);
    assert_eq!(
        value["errors"][0]["message"],
        "Field 'product' does not have an argument named 'identifier'."
    );
}
