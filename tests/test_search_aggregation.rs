use cocktail_lab::{aggregator, CocktailDbClient, CocktailError, SearchFilters};
use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::{json, Value};

fn drink(id: &str, name: &str) -> Value {
    json!({
        "idDrink": id,
        "strDrink": name,
        "strDrinkThumb": format!("https://img.example/{}.jpg", id),
    })
}

fn lookup_body(id: &str, name: &str, category: &str) -> String {
    json!({
        "drinks": [{
            "idDrink": id,
            "strDrink": name,
            "strDrinkThumb": format!("https://img.example/{}.jpg", id),
            "strCategory": category,
            "strInstructions": "Stir.",
            "strIngredient1": "Gin",
            "strMeasure1": "50 ml",
        }]
    })
    .to_string()
}

async fn mock_drinks(
    server: &mut ServerGuard,
    path: &str,
    key: &str,
    value: &str,
    drinks: Vec<Value>,
) -> Mock {
    server
        .mock("GET", path)
        .match_query(Matcher::UrlEncoded(key.into(), value.into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "drinks": drinks }).to_string())
        .create_async()
        .await
}

#[tokio::test]
async fn test_ingredient_search_merges_name_and_ingredient_results() {
    let mut server = Server::new_async().await;
    let by_name = mock_drinks(
        &mut server,
        "/search.php",
        "s",
        "rum",
        vec![drink("1", "Mojito")],
    )
    .await;
    let by_ingredient = mock_drinks(
        &mut server,
        "/filter.php",
        "i",
        "rum",
        vec![drink("1", "Mojito"), drink("2", "Daiquiri")],
    )
    .await;

    let client = CocktailDbClient::with_base_url(server.url());
    let drinks = aggregator::search(&client, &SearchFilters::by_ingredient("rum"))
        .await
        .unwrap();

    let mut ids: Vec<&str> = drinks.iter().map(|d| d.id.as_str()).collect();
    ids.sort();
    assert_eq!(ids, vec!["1", "2"]);
    by_name.assert_async().await;
    by_ingredient.assert_async().await;
}

#[tokio::test]
async fn test_category_search_stamps_requested_category() {
    let mut server = Server::new_async().await;
    let _m = mock_drinks(&mut server, "/filter.php", "c", "Cocktail", vec![drink("1", "X")]).await;

    let client = CocktailDbClient::with_base_url(server.url());
    let drinks = aggregator::search(&client, &SearchFilters::by_category("Cocktail"))
        .await
        .unwrap();

    assert_eq!(drinks.len(), 1);
    assert_eq!(drinks[0].id, "1");
    assert_eq!(drinks[0].name, "X");
    assert_eq!(drinks[0].category.as_deref(), Some("Cocktail"));
}

#[tokio::test]
async fn test_combined_search_looks_up_categories_and_filters() {
    let mut server = Server::new_async().await;
    let _name = mock_drinks(&mut server, "/search.php", "s", "gin", vec![]).await;
    let _ingredient = mock_drinks(
        &mut server,
        "/filter.php",
        "i",
        "gin",
        vec![drink("10", "Negroni"), drink("11", "Gin Punch")],
    )
    .await;
    let negroni = server
        .mock("GET", "/lookup.php")
        .match_query(Matcher::UrlEncoded("i".into(), "10".into()))
        .with_status(200)
        .with_body(lookup_body("10", "Negroni", "Ordinary Drink"))
        .create_async()
        .await;
    let punch = server
        .mock("GET", "/lookup.php")
        .match_query(Matcher::UrlEncoded("i".into(), "11".into()))
        .with_status(200)
        .with_body(lookup_body("11", "Gin Punch", "Punch / Party Drink"))
        .create_async()
        .await;

    let client = CocktailDbClient::with_base_url(server.url());
    let drinks = aggregator::search(&client, &SearchFilters::new("gin", "ordinary drink"))
        .await
        .unwrap();

    assert_eq!(drinks.len(), 1);
    assert_eq!(drinks[0].name, "Negroni");
    assert_eq!(drinks[0].category.as_deref(), Some("Ordinary Drink"));
    negroni.assert_async().await;
    punch.assert_async().await;
}

#[tokio::test]
async fn test_combined_search_skips_lookup_when_category_known() {
    let mut server = Server::new_async().await;
    let mut with_category = drink("20", "Gin Fizz");
    with_category["strCategory"] = json!("Ordinary Drink");
    let _name = mock_drinks(&mut server, "/search.php", "s", "gin", vec![with_category]).await;
    let _ingredient = mock_drinks(
        &mut server,
        "/filter.php",
        "i",
        "gin",
        vec![drink("20", "Gin Fizz")],
    )
    .await;
    let lookup = server
        .mock("GET", "/lookup.php")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = CocktailDbClient::with_base_url(server.url());
    let drinks = aggregator::search(&client, &SearchFilters::new("gin", "Ordinary Drink"))
        .await
        .unwrap();

    assert_eq!(drinks.len(), 1);
    lookup.assert_async().await;
}

#[tokio::test]
async fn test_failed_endpoint_degrades_to_partial_results() {
    let mut server = Server::new_async().await;
    let _name = server
        .mock("GET", "/search.php")
        .match_query(Matcher::Any)
        .with_status(503)
        .create_async()
        .await;
    let _ingredient = mock_drinks(
        &mut server,
        "/filter.php",
        "i",
        "rum",
        vec![drink("2", "Daiquiri")],
    )
    .await;

    let client = CocktailDbClient::with_base_url(server.url());
    let drinks = aggregator::search(&client, &SearchFilters::by_ingredient("rum"))
        .await
        .unwrap();

    assert_eq!(drinks.len(), 1);
    assert_eq!(drinks[0].id, "2");
}

#[tokio::test]
async fn test_blank_filters_make_no_requests() {
    let mut server = Server::new_async().await;
    let any = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = CocktailDbClient::with_base_url(server.url());
    let result = aggregator::search(&client, &SearchFilters::new("  ", "")).await;

    assert!(matches!(result, Err(CocktailError::InvalidFilters)));
    any.assert_async().await;
}
