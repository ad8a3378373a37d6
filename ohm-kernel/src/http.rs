/**
 * API REST OHM - Serveur HTTP des calculs électriques
 *
 * RÔLE :
 * Expose une route POST par formule (/CalcularTensao, /CalcularEnergiaVIT...)
 * plus la page d'accueil et les routes de santé.
 *
 * FONCTIONNEMENT :
 * - Corps JSON décodé dans un `ElectricalQuantities` propre à la requête
 * - Précondition + calcul via la table `Formula`
 * - Réponse `{"resposta": "..."}`, erreurs en texte brut (400 / 500)
 * - Le Content-Type de la requête n'est pas exigé
 *
 * ROUTES :
 * - GET  /homepage        description texte des endpoints
 * - GET  /health          "ok"
 * - GET  /system/health   compteurs (uptime, requêtes, calculs par endpoint)
 * - POST /Calcular*       un calcul par route
 */

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::error::CalcError;
use crate::formulas::Formula;
use crate::health::KernelHealth;
use crate::models::ElectricalQuantities;
use crate::state::AppState;

pub fn build_router(app_state: AppState) -> Router {
    let mut router = Router::new()
        .route("/homepage", get(homepage))
        .route("/health", get(|| async { "ok" }))
        .route("/system/health", get(get_system_health));

    // une route POST par formule, même handler
    for formula in Formula::ALL {
        router = router.route(
            formula.path(),
            post(
                move |State(app): State<AppState>, body: Result<Bytes, BytesRejection>| async move {
                    calculate(&app, formula, body)
                },
            ),
        );
    }

    router
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}

// GET /homepage
async fn homepage() -> String {
    homepage_text()
}

pub fn homepage_text() -> String {
    let endpoints: Vec<&str> = Formula::ALL.iter().map(|f| f.path()).collect();
    format!(
        "API Leis de Ohm.\nUse os endpoints POST {} para realizar cálculos elétricos.",
        endpoints.join(", ")
    )
}

// GET /system/health
async fn get_system_health(State(app): State<AppState>) -> Json<KernelHealth> {
    Json(app.health.get_health())
}

/// POST /Calcular* : décode, vérifie, calcule, sérialise.
fn calculate(app: &AppState, formula: Formula, body: Result<Bytes, BytesRejection>) -> Response {
    let span = tracing::info_span!("calc", endpoint = formula.name(), id = %Uuid::new_v4());
    let _guard = span.enter();

    // corps illisible ou trop gros (> 2 Mo par défaut) : même chemin que le JSON invalide
    let result = body
        .map_err(|rejection| CalcError::MalformedInput(rejection.body_text()))
        .and_then(|body| run_formula(formula, &body));

    match result {
        Ok(payload) => {
            app.health.record_success(formula);
            ([(header::CONTENT_TYPE, "application/json")], payload).into_response()
        }
        Err(e) => {
            app.health.record_failure();
            tracing::warn!(status = e.status().as_u16(), "calcul refusé: {e}");
            e.into_response()
        }
    }
}

fn run_formula(formula: Formula, body: &[u8]) -> Result<Vec<u8>, CalcError> {
    // record neuf à chaque requête, jamais partagé
    let mut quantities: ElectricalQuantities =
        serde_json::from_slice(body).map_err(|e| CalcError::MalformedInput(e.to_string()))?;

    let (value, resposta) = formula.evaluate(&mut quantities)?;
    if !value.is_finite() {
        tracing::warn!(?quantities, "résultat non fini ({value})");
    } else {
        tracing::debug!(field = formula.output_field(), value, "calcul ok");
    }

    Ok(serde_json::to_vec(&resposta)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::HealthTracker;
    use crate::models::Resposta;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn app() -> Router {
        build_router(AppState::default())
    }

    async fn send(router: Router, method: &str, path: &str, body: &str) -> (StatusCode, String) {
        let req = Request::builder()
            .method(method)
            .uri(path)
            .body(Body::from(body.to_owned()))
            .unwrap();
        let res = router.oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn post_json(path: &str, body: &str) -> (StatusCode, String) {
        send(app(), "POST", path, body).await
    }

    fn resposta(body: &str) -> String {
        serde_json::from_str::<Resposta>(body).unwrap().resposta
    }

    #[tokio::test]
    async fn test_tensao_scenario() {
        let (status, body) = post_json("/CalcularTensao", r#"{"resistencia":10,"corrente":2}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&body).unwrap(),
            serde_json::json!({"resposta": "A tensão é 20.00 volts"})
        );
    }

    #[tokio::test]
    async fn test_tensao_zero_resistance() {
        let (status, body) = post_json("/CalcularTensao", r#"{"resistencia":0,"corrente":2,"tensao":5}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Resistência não pode ser zero para calcular a tensão");

        let (status, _) = post_json("/CalcularTensao", "{}").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_resistencia_zero_current_scenario() {
        let (status, body) = post_json("/CalcularResistencia", r#"{"tensao":10,"corrente":0}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("Corrente não pode ser zero"));
    }

    #[tokio::test]
    async fn test_malformed_input_on_every_endpoint() {
        for formula in Formula::ALL {
            for bad in ["not json", "", r#"{"corrente": "dois"}"#, "42", r#"{"tensao": 1"#] {
                let (status, body) = post_json(formula.path(), bad).await;
                assert_eq!(status, StatusCode::BAD_REQUEST, "{} with {bad:?}", formula.name());
                assert!(!body.is_empty());
            }
        }
    }

    #[tokio::test]
    async fn test_oversized_body_is_malformed_input() {
        let health = HealthTracker::new();
        let router = build_router(AppState { health: health.clone() });
        let body = format!(r#"{{"tensao":1,"pad":"{}"}}"#, "x".repeat(3 * 1024 * 1024));

        let (status, text) = send(router, "POST", "/CalcularPotenciaVI", &body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!text.is_empty());

        let view = health.get_health();
        assert_eq!(view.requests_total, 1);
        assert_eq!(view.requests_failed, 1);
    }

    #[tokio::test]
    async fn test_content_type_not_required() {
        let req = Request::builder()
            .method("POST")
            .uri("/CalcularCorrente")
            .header(header::CONTENT_TYPE, "text/plain")
            .body(Body::from(r#"{"tensao":12,"resistencia":4}"#))
            .unwrap();
        let res = app().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            res.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        assert_eq!(resposta(std::str::from_utf8(&bytes).unwrap()), "A corrente é 3.00 amperes");
    }

    #[tokio::test]
    async fn test_resistividade_route() {
        let (status, _) = post_json("/CalcularResistividade", r#"{"resistividade":1,"comprimento":2}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = post_json(
            "/CalcularResistividade",
            r#"{"resistividade":2,"comprimento":10,"area":4}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(resposta(&body), "A resistência elétrica é 5.00");
    }

    #[tokio::test]
    async fn test_energy_and_power_routes() {
        let cases = [
            ("/CalcularEnergia", r#"{"potencia":100,"tempo":60}"#, "A energia elétrica é 6000.00"),
            (
                "/CalcularEnergiaVIT",
                r#"{"tensao":12,"corrente":2,"tempo":10}"#,
                "A energia usando tensão, corrente e tempo é 240.00",
            ),
            (
                "/CalcularEnergiaCRT",
                r#"{"corrente":2,"resistencia":3,"tempo":4}"#,
                "A energia usando corrente, resistência e tempo é 48.00",
            ),
            (
                "/CalcularEnergiaVRT",
                r#"{"tensao":6,"resistencia":3,"tempo":2}"#,
                "A energia usando tensão, resistência e tempo é 24.00",
            ),
            (
                "/CalcularPotenciaVI",
                r#"{"tensao":5,"corrente":0.5}"#,
                "A potência usando tensão e corrente é 2.50 watts",
            ),
            (
                "/CalcularPotenciaIR",
                r#"{"corrente":3,"resistencia":2}"#,
                "A potência usando corrente e resistência é 18.00 watts",
            ),
            (
                "/CalcularPotenciaVR",
                r#"{"corrente":3,"resistencia":2}"#,
                "A potência usando corrente ao quadrado e resistência é 18.00 watts",
            ),
        ];
        for (path, body, expected) in cases {
            let (status, res) = post_json(path, body).await;
            assert_eq!(status, StatusCode::OK, "{path}");
            assert_eq!(resposta(&res), expected);
        }
    }

    #[tokio::test]
    async fn test_energia_vrt_zero_resistance_is_ok() {
        let (status, body) = post_json("/CalcularEnergiaVRT", r#"{"tensao":6,"tempo":2}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(resposta(&body), "A energia usando tensão, resistência e tempo é inf");
    }

    #[tokio::test]
    async fn test_concurrent_requests_are_isolated() {
        let router = app();
        let mut handles = Vec::new();
        for i in 1..=32 {
            let router = router.clone();
            handles.push(tokio::spawn(async move {
                let body = format!(r#"{{"resistencia":{i},"corrente":2}}"#);
                let (status, res) = send(router, "POST", "/CalcularTensao", &body).await;
                (i, status, res)
            }));
        }
        for handle in handles {
            let (i, status, res) = handle.await.unwrap();
            assert_eq!(status, StatusCode::OK);
            assert_eq!(resposta(&res), format!("A tensão é {:.2} volts", f64::from(i) * 2.0));
        }
    }

    #[tokio::test]
    async fn test_homepage_lists_every_endpoint() {
        let (status, body) = send(app(), "GET", "/homepage", "").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.starts_with("API Leis de Ohm."));
        for formula in Formula::ALL {
            assert!(body.contains(formula.path()), "missing {}", formula.path());
        }
    }

    #[tokio::test]
    async fn test_wrong_method_and_unknown_path() {
        let (status, _) = send(app(), "GET", "/CalcularTensao", "").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

        let (status, _) = send(app(), "POST", "/homepage", "{}").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

        let (status, _) = post_json("/CalcularFrequencia", "{}").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_health_routes() {
        let (status, body) = send(app(), "GET", "/health", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");

        let health = HealthTracker::new();
        let router = build_router(AppState { health: health.clone() });
        send(router.clone(), "POST", "/CalcularTensao", r#"{"resistencia":1,"corrente":1}"#).await;
        send(router.clone(), "POST", "/CalcularTensao", "oops").await;
        send(router.clone(), "POST", "/CalcularPotenciaIR", "{}").await;

        let (status, body) = send(router, "GET", "/system/health", "").await;
        assert_eq!(status, StatusCode::OK);
        let view: KernelHealth = serde_json::from_str(&body).unwrap();
        assert_eq!(view.requests_total, 3);
        assert_eq!(view.requests_failed, 1);
        assert_eq!(view.calculations.get("CalcularTensao"), Some(&1));
        assert_eq!(view.calculations.get("CalcularPotenciaIR"), Some(&1));
        assert_eq!(health.get_health().requests_total, 3);
    }
}
