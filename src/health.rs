use actix_web::{get, web, HttpResponse, Responder};
use deadpool_redis::{redis, Pool};
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Serialize)]
struct ReadinessResponse {
    status: &'static str,
    database: &'static str,
    redis: &'static str,
}

fn status_of(ok: bool) -> &'static str {
    if ok {
        "ok"
    } else {
        "unhealthy"
    }
}

/// LIVENESS PROBE
/// - No I/O
#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse { status: "ok" })
}

async fn database_ready(db: &DatabaseConnection) -> bool {
    match db
        .execute(Statement::from_string(
            db.get_database_backend(),
            "SELECT 1",
        ))
        .await
    {
        Ok(_) => true,
        Err(e) => {
            warn!(error = %e, "Database readiness check failed");
            false
        }
    }
}

async fn redis_ready(pool: &Pool) -> bool {
    let mut conn = match pool.get().await {
        Ok(conn) => conn,
        Err(e) => {
            warn!(error = %e, "Redis pool exhausted or unreachable");
            return false;
        }
    };
    match redis::cmd("PING").query_async::<String>(&mut conn).await {
        Ok(_) => true,
        Err(e) => {
            warn!(error = %e, "Redis readiness check failed");
            false
        }
    }
}

/// READINESS PROBE
/// - Checks PostgreSQL and Redis
#[get("/ready")]
pub async fn readiness(
    db: web::Data<Arc<DatabaseConnection>>,
    redis: web::Data<Arc<Pool>>,
) -> impl Responder {
    let db_ok = database_ready(&db).await;
    let redis_ok = redis_ready(&redis).await;

    let body = ReadinessResponse {
        status: status_of(db_ok && redis_ok),
        database: status_of(db_ok),
        redis: status_of(redis_ok),
    };

    if db_ok && redis_ok {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}
