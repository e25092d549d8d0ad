mod common;

use axum::http::StatusCode;
use common::*;
use gigboard_db::entities::venue;
use sea_orm::{EntityTrait, PaginatorTrait};

#[tokio::test]
async fn test_list_venues_grouped_by_city_and_state() {
    let (app, db) = test_app().await;
    let hop = seed_venue(&db, "The Musical Hop", "San Francisco", "CA", &["Jazz"]).await;
    seed_venue(&db, "Park Square Live Music & Coffee", "San Francisco", "CA", &["Folk"]).await;
    seed_venue(&db, "The Dueling Pianos Bar", "New York", "NY", &["Classical"]).await;
    let artist = seed_artist(&db, "Guns N Petals", &["Rock n Roll"]).await;
    seed_show(&db, hop.id, artist.id, days_from_now(3)).await;
    seed_show(&db, hop.id, artist.id, days_from_now(-3)).await;

    let resp = get(&app, "/venues").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body.matches("<h3>").count(), 2);
    assert!(resp.body.contains("San Francisco, CA"));
    assert!(resp.body.contains("New York, NY"));
    assert!(resp.body.contains("The Dueling Pianos Bar"));
    // Only the future show counts.
    assert!(resp.body.contains("1 upcoming shows"));
}

#[tokio::test]
async fn test_search_venues_is_case_insensitive() {
    let (app, db) = test_app().await;
    seed_venue(&db, "The Musical Hop", "San Francisco", "CA", &["Jazz"]).await;
    seed_venue(&db, "Park Square Live Music & Coffee", "San Francisco", "CA", &["Folk"]).await;

    for term in ["musical", "MUSICAL", "Hop"] {
        let resp = post_form(&app, "/venues/search", &[("search_term", term)]).await;
        assert_eq!(resp.status, StatusCode::OK);
        assert!(resp.body.contains("The Musical Hop"), "term {term}");
        assert!(resp.body.contains(": 1</h3>"), "term {term}");
        assert!(!resp.body.contains("Park Square"), "term {term}");
    }

    let resp = post_form(&app, "/venues/search", &[("search_term", "Music")]).await;
    assert!(resp.body.contains(": 2</h3>"));
}

#[tokio::test]
async fn test_search_venues_folds_term_like_column() {
    let (app, db) = test_app().await;
    seed_venue(&db, "CAFÉ Hop", "San Francisco", "CA", &["Jazz"]).await;

    for term in ["CAFÉ", "cafÉ HOP", "É H"] {
        let resp = post_form(&app, "/venues/search", &[("search_term", term)]).await;
        assert!(resp.body.contains(": 1</h3>"), "term {term}");
    }
}

#[tokio::test]
async fn test_search_venues_treats_wildcards_literally() {
    let (app, db) = test_app().await;
    seed_venue(&db, "The Musical Hop", "San Francisco", "CA", &["Jazz"]).await;

    let resp = post_form(&app, "/venues/search", &[("search_term", "%")]).await;
    assert!(resp.body.contains(": 0</h3>"));
}

#[tokio::test]
async fn test_show_venue_detail() {
    let (app, db) = test_app().await;
    let hop = seed_venue(&db, "The Musical Hop", "San Francisco", "CA", &["Jazz", "Reggae"]).await;
    let artist = seed_artist(&db, "Guns N Petals", &["Rock n Roll"]).await;
    seed_show(&db, hop.id, artist.id, days_from_now(-10)).await;
    seed_show(&db, hop.id, artist.id, days_from_now(10)).await;
    seed_show(&db, hop.id, artist.id, days_from_now(20)).await;

    let resp = get(&app, &format!("/venues/{}", hop.id)).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("The Musical Hop"));
    assert!(resp.body.contains(r#"<span class="genre">Jazz</span>"#));
    assert!(resp.body.contains(r#"<span class="genre">Reggae</span>"#));
    assert!(resp.body.contains("2 Upcoming Shows"));
    assert!(resp.body.contains("1 Past Shows"));
    assert!(resp.body.contains(&format!("/artists/{}", artist.id)));
}

#[tokio::test]
async fn test_show_venue_unknown_id_is_404() {
    let (app, _db) = test_app().await;

    let resp = get(&app, "/venues/999").await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert!(resp.body.contains("404"));

    let resp = get(&app, "/venues/not-a-number").await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_venue_form_lists_choices() {
    let (app, _db) = test_app().await;

    let resp = get(&app, "/venues/create").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains(r#"value="CA""#));
    assert!(resp.body.contains(r#"value="Jazz""#));
}

#[tokio::test]
async fn test_create_venue_success() {
    let (app, db) = test_app().await;

    let resp = post_form(
        &app,
        "/venues/create",
        &[
            ("name", "The Musical Hop"),
            ("city", "San Francisco"),
            ("state", "CA"),
            ("address", "1015 Folsom Street"),
            ("phone", "123-123-1234"),
            ("genres", "Reggae"),
            ("genres", "Jazz"),
            ("website_link", "https://www.themusicalhop.com"),
            ("seeking_talent", "y"),
        ],
    )
    .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Venue The Musical Hop was successfully listed!"));

    let rows = venue::Entity::find().all(&db).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].website.as_deref(), Some("https://www.themusicalhop.com"));
    assert!(rows[0].seeking_talent);
    assert_eq!(
        gigboard_db::genres::decode(&rows[0].genres).unwrap(),
        vec!["Reggae".to_string(), "Jazz".to_string()]
    );

    // The detail page lists genres in submission order.
    let resp = get(&app, &format!("/venues/{}", rows[0].id)).await;
    assert_eq!(resp.status, StatusCode::OK);
    let reggae = resp.body.find(r#"<span class="genre">Reggae</span>"#).unwrap();
    let jazz = resp.body.find(r#"<span class="genre">Jazz</span>"#).unwrap();
    assert!(reggae < jazz);
}

#[tokio::test]
async fn test_create_venue_repeated_name_renders_home() {
    let (app, db) = test_app().await;

    let resp = post_form(
        &app,
        "/venues/create",
        &[
            ("name", "The Musical Hop"),
            ("name", "The Dueling Pianos Bar"),
            ("city", "San Francisco"),
            ("state", "CA"),
            ("address", "1015 Folsom Street"),
            ("genres", "Jazz"),
        ],
    )
    .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("/venues/create"));
    assert!(resp.body.contains("An error occurred. Venue could not be listed."));
    assert_eq!(venue::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_create_venue_wrong_content_type_renders_home() {
    let (app, db) = test_app().await;

    let resp = post_json(&app, "/venues/create", r#"{"name":"The Musical Hop"}"#).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("An error occurred. Venue could not be listed."));
    assert_eq!(venue::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_create_venue_missing_field_inserts_nothing() {
    let (app, db) = test_app().await;

    let resp = post_form(
        &app,
        "/venues/create",
        &[
            ("city", "San Francisco"),
            ("state", "CA"),
            ("address", "1015 Folsom Street"),
            ("genres", "Jazz"),
        ],
    )
    .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Invalid input in name field."));
    assert!(resp.body.contains("This field is required."));
    assert_eq!(venue::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_create_venue_rejects_unknown_state_and_bad_url() {
    let (app, db) = test_app().await;

    let resp = post_form(
        &app,
        "/venues/create",
        &[
            ("name", "The Musical Hop"),
            ("city", "San Francisco"),
            ("state", "ZZ"),
            ("address", "1015 Folsom Street"),
            ("genres", "Jazz"),
            ("facebook_link", "not a url"),
        ],
    )
    .await;
    assert!(resp.body.contains("Invalid input in state field."));
    assert!(resp.body.contains("Invalid input in facebook_link field."));
    assert_eq!(venue::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_edit_venue_stubs() {
    let (app, _db) = test_app().await;

    let resp = get(&app, "/venues/1/edit").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("The Musical Hop"));
    assert!(resp.body.contains(r#"value="1015 Folsom Street""#));

    let resp = post_form(&app, "/venues/7/edit", &[("name", "Renamed")]).await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.headers["location"], "/venues/7");
}

#[tokio::test]
async fn test_delete_venue_is_a_no_op() {
    let (app, db) = test_app().await;
    let hop = seed_venue(&db, "The Musical Hop", "San Francisco", "CA", &["Jazz"]).await;

    let resp = delete(&app, &format!("/venues/{}", hop.id)).await;
    assert_eq!(resp.status, StatusCode::NO_CONTENT);
    assert_eq!(venue::Entity::find().count(&db).await.unwrap(), 1);
}
