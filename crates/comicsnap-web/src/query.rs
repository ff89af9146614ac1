use comicsnap_schema::*;
use reqwest::{header, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::utils::api_url;

fn map_reqwest_error(e: reqwest::Error) -> ApiError {
    if e.is_decode() {
        ApiError::Decode(e.to_string())
    } else {
        ApiError::Network(e.to_string())
    }
}

async fn send(req: RequestBuilder) -> Result<Response, ApiError> {
    let res = req.send().await.map_err(map_reqwest_error)?;
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }

    let body = res.text().await.unwrap_or_default();
    let err = ApiError::from_response(status.as_u16(), &body);
    error!("request failed with {}: {}", status, err);
    Err(err)
}

async fn send_json<T>(req: RequestBuilder) -> Result<T, ApiError>
where
    T: DeserializeOwned,
{
    send(req).await?.json().await.map_err(map_reqwest_error)
}

fn get(path: &str, token: Option<&str>) -> RequestBuilder {
    let req = reqwest::Client::new()
        .get(api_url(path))
        .header(header::ACCEPT, "application/json");
    match token {
        Some(token) => req.bearer_auth(token),
        None => req,
    }
}

fn post(path: &str, token: Option<&str>) -> RequestBuilder {
    let req = reqwest::Client::new().post(api_url(path));
    match token {
        Some(token) => req.bearer_auth(token),
        None => req,
    }
}

pub async fn search(term: &str) -> Result<Vec<ComicSummary>, ApiError> {
    send_json(get("/search", None).query(&[("q", term)])).await
}

/// Fails with [`ApiError::AlreadyExists`] when the comic is already in the
/// user's collection. Any other answer lets the caller go on.
pub async fn check_read_comic(token: &str, comic_id: &ComicId) -> Result<(), ApiError> {
    let path = format!("/aggiungi_fumetto_letto/{}", comic_id);
    let res = get(&path, Some(token))
        .send()
        .await
        .map_err(map_reqwest_error)?;

    match res.status() {
        StatusCode::CONFLICT => Err(ApiError::AlreadyExists),
        status if !status.is_success() => {
            warn!("check {} answered {}", comic_id, status);
            Ok(())
        }
        _ => Ok(()),
    }
}

pub async fn add_read_comic(token: &str, body: &ReadComicRequest) -> Result<(), ApiError> {
    send(post("/aggiungi_fumetto_letto", Some(token)).json(body)).await?;

    Ok(())
}

pub async fn fetch_read_comics(token: &str) -> Result<Vec<CollectionEntry>, ApiError> {
    send_json(get("/fumetti_letti", Some(token))).await
}

pub async fn fetch_favorite_ids(token: &str) -> Result<Vec<ComicId>, ApiError> {
    send_json(get("/check_preferiti", Some(token))).await
}

pub async fn add_favorite(token: &str, body: &FavoriteRequest) -> Result<(), ApiError> {
    send(post("/aggiungi_preferito", Some(token)).json(body)).await?;

    Ok(())
}

pub async fn user_login(credentials: &Credentials) -> Result<String, ApiError> {
    let res: TokenResponse = send_json(post("/login", None).json(credentials)).await?;

    Ok(res.token)
}

pub async fn user_register(credentials: &Credentials) -> Result<String, ApiError> {
    let res: TokenResponse = send_json(post("/registrazione", None).json(credentials)).await?;

    Ok(res.token)
}

pub async fn user_logout() -> Result<(), ApiError> {
    send(post("/logout", None).header(header::CONTENT_TYPE, "application/json")).await?;

    Ok(())
}

pub async fn fetch_recommendations(token: &str) -> Result<Vec<Recommendation>, ApiError> {
    send_json(get("/raccomandazioni", Some(token))).await
}
