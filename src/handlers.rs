use actix_web::{web, HttpResponse, Responder};
use log::warn;

use crate::domain::network::{FixedCosts, Network};
use crate::domain::solve::solve_plan;
use crate::domain::solver::Solver;
use crate::domain::validate::check_fixed_costs;
use crate::models::{ApiError, ApiPlan, CostForm, SolveRequest};
use crate::render::render_page;

const HTML: &str = "text/html; charset=utf-8";

/// Shared, read-only per-process state
pub struct AppState {
    pub network: Network,
    pub solver: Box<dyn Solver>,
}

impl AppState {
    pub fn new(solver: Box<dyn Solver>) -> Self {
        AppState {
            network: Network::standard(),
            solver,
        }
    }
}

// ---------- Route handlers ----------

/// GET /
pub async fn index() -> impl Responder {
    HttpResponse::Ok()
        .content_type(HTML)
        .body(render_page(&CostForm::default(), None, None))
}

/// POST /
pub async fn submit(state: web::Data<AppState>, form: web::Form<CostForm>) -> HttpResponse {
    let form = form.into_inner();
    let costs = match FixedCosts::try_from(&form) {
        Ok(costs) => costs,
        Err(err) => {
            warn!("Rejected form submission: {}", err);
            return HttpResponse::BadRequest()
                .content_type(HTML)
                .body(render_page(&form, Some(&err.to_string()), None));
        }
    };

    let plan = solve_plan(state.solver.as_ref(), &state.network, &costs);
    HttpResponse::Ok()
        .content_type(HTML)
        .body(render_page(&form, None, Some(&plan)))
}

/// POST /api/solve
pub async fn api_solve(state: web::Data<AppState>, req: web::Json<SolveRequest>) -> HttpResponse {
    let costs = match check_fixed_costs(FixedCosts::from(&*req)) {
        Ok(costs) => costs,
        Err(err) => {
            warn!("Rejected solve request: {}", err);
            return HttpResponse::BadRequest().json(ApiError { error: err.to_string() });
        }
    };

    let plan = solve_plan(state.solver.as_ref(), &state.network, &costs);
    HttpResponse::Ok().json(ApiPlan::from(plan))
}

/// GET /health
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("OK")
}

/// Register routes and extractor configuration.
pub fn configure(cfg: &mut web::ServiceConfig, form_limit: usize, json_limit: usize) {
    cfg.app_data(
        web::FormConfig::default()
            .limit(form_limit)
            .error_handler(|err, _| {
                let detail = format!("The form could not be read: {}", err);
                warn!("{}", detail);
                actix_web::error::InternalError::from_response(
                    err,
                    HttpResponse::BadRequest()
                        .content_type(HTML)
                        .body(render_page(&CostForm::default(), Some(&detail), None)),
                )
                .into()
            }),
    )
    .app_data(
        web::JsonConfig::default()
            .limit(json_limit)
            .error_handler(|err, _| {
                let err_string = err.to_string();
                actix_web::error::InternalError::from_response(
                    err,
                    HttpResponse::BadRequest().json(ApiError { error: err_string }),
                )
                .into()
            }),
    )
    .route("/", web::get().to(index))
    .route("/", web::post().to(submit))
    .route("/api/solve", web::post().to(api_solve))
    .route("/health", web::get().to(health_check));
}
