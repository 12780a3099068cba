use crate::error::ServerError;
use crate::store::Tables;
use actix_web::{delete, get, post, put, web, HttpResponse};
use serde_json::Value;
use shared::ResourceKind;

// ---- Apis ("/api/*") ----

fn kind(resource: &str) -> Result<ResourceKind, ServerError> {
    ResourceKind::from_path(resource).ok_or_else(|| ServerError::UnknownResource(resource.to_string()))
}

#[get("/{resource}")]
async fn list(tables: web::Data<Tables>, path: web::Path<String>) -> Result<HttpResponse, ServerError> {
    let kind = kind(&path)?;
    Ok(HttpResponse::Ok().json(tables.list(kind)?))
}

#[get("/{resource}/{id}")]
async fn get_one(
    tables: web::Data<Tables>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, ServerError> {
    let (resource, id) = path.into_inner();
    Ok(HttpResponse::Ok().json(tables.get(kind(&resource)?, &id)?))
}

#[post("/{resource}")]
async fn create(
    tables: web::Data<Tables>,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ServerError> {
    let kind = kind(&path)?;
    Ok(HttpResponse::Created().json(tables.insert(kind, body.into_inner())?))
}

#[put("/{resource}/{id}")]
async fn update(
    tables: web::Data<Tables>,
    path: web::Path<(String, String)>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ServerError> {
    let (resource, id) = path.into_inner();
    Ok(HttpResponse::Ok().json(tables.replace(kind(&resource)?, &id, body.into_inner())?))
}

#[delete("/{resource}/{id}")]
async fn remove(
    tables: web::Data<Tables>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, ServerError> {
    let (resource, id) = path.into_inner();
    tables.remove(kind(&resource)?, &id)?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(list)
            .service(get_one)
            .service(create)
            .service(update)
            .service(remove)
            .default_service(web::route().to(HttpResponse::NotFound)),
    );
}
