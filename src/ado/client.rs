//! Azure DevOps REST client
//!
//! Wraps the handful of Test Plans endpoints needed to publish a run:
//! name lookups, run creation, result submission and run completion.
//! Every call carries the pinned `api-version` and PAT basic auth.

use std::collections::HashMap;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::common::{utc_timestamp, Config, Error, Result};
use crate::results::{self, LocalResult, MergeOutcome, RecordDefaults, ResultRecord};

use super::types::*;

const RUNS_PATH: &str = "/_apis/test/runs";
const TEST_PLANS_PATH: &str = "/_apis/testplan/plans";

/// A response whose body has already been read and logged
#[derive(Debug)]
struct ApiResponse {
    method: Method,
    url: String,
    status: StatusCode,
    body: String,
}

impl ApiResponse {
    /// Fail on any non-2xx status
    fn error_for_status(self) -> Result<Self> {
        if self.status.is_success() {
            Ok(self)
        } else {
            Err(Error::http_status(
                self.method.as_str(),
                &self.url,
                self.status.as_u16(),
                &self.body,
            ))
        }
    }

    /// Fail on anything but exactly 200
    fn expect_ok(self, action: &str) -> Result<Self> {
        if self.status == StatusCode::OK {
            Ok(self)
        } else {
            Err(Error::unexpected_response(action, self.status.as_u16(), &self.body))
        }
    }

    fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Client for one organization/project pair
pub struct AdoClient {
    http: reqwest::Client,
    /// `<org url>/<project>` without a trailing slash
    base_uri: String,
    token: String,
    api_version: String,
    run_name_prefix: String,
    defaults: RecordDefaults,
}

impl AdoClient {
    /// Create a client for `org_url`/`project`, authenticating with `token`
    pub fn new(org_url: &str, project: &str, token: &str, config: &Config) -> Result<Self> {
        let base_uri = format!(
            "{}/{}",
            org_url.trim_end_matches('/'),
            project.trim_start_matches('/')
        );

        reqwest::Url::parse(&base_uri)
            .map_err(|e| Error::Config(format!("Invalid organization URL '{}': {}", org_url, e)))?;

        let http = reqwest::Client::builder()
            .user_agent(concat!("ado-results/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_uri,
            token: token.to_string(),
            api_version: config.api.version.clone(),
            run_name_prefix: config.run.name_prefix.clone(),
            defaults: config.results.clone().into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_uri, path)
    }

    /// Start a request with the api-version and credentials every call needs
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, self.url(path))
            .query(&[("api-version", self.api_version.as_str())])
            .basic_auth("", Some(&self.token))
    }

    /// Send one request and read the whole response body
    async fn send(&self, builder: RequestBuilder) -> Result<ApiResponse> {
        let request = builder.build()?;
        let method = request.method().clone();

        tracing::debug!("Request Headers: {:?}", redacted(request.headers()));
        if let Some(body) = request.body().and_then(|b| b.as_bytes()) {
            tracing::debug!("Request Body: {}", String::from_utf8_lossy(body));
        }

        let response = self.http.execute(request).await?;
        let status = response.status();
        let url = response.url().to_string();

        tracing::info!("{} : {} -> {}", method, url, status.as_u16());
        tracing::debug!("Response Headers: {:?}", response.headers());

        let body = response.text().await?;
        tracing::debug!("Response Body: {}", body);

        Ok(ApiResponse {
            method,
            url,
            status,
            body,
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(self.request(Method::GET, path))
            .await?
            .error_for_status()?
            .json()
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request(Method::POST, path).json(body))
            .await?
            .error_for_status()?
            .json()
    }

    async fn patch<B: Serialize + ?Sized>(&self, path: &str, body: &B, action: &str) -> Result<()> {
        self.send(self.request(Method::PATCH, path).json(body))
            .await?
            .expect_ok(action)?;
        Ok(())
    }

    /// Resolve a test plan name to its id
    pub async fn resolve_plan(&self, name: &str) -> Result<i64> {
        let plans: ListResponse<NamedEntity> = self.get(TEST_PLANS_PATH).await?;
        find_by_name(&plans.value, name).ok_or_else(|| Error::PlanNotFound {
            name: name.to_string(),
        })
    }

    /// Resolve a test suite name to its id within a plan
    pub async fn resolve_suite(&self, plan_id: i64, name: &str) -> Result<i64> {
        let path = format!("{}/{}/suites", TEST_PLANS_PATH, plan_id);
        let suites: ListResponse<NamedEntity> = self.get(&path).await?;
        find_by_name(&suites.value, name).ok_or_else(|| Error::SuiteNotFound {
            name: name.to_string(),
            plan_id,
        })
    }

    /// List the ids of every test point in a suite
    pub async fn list_test_points(&self, plan_id: i64, suite_id: i64) -> Result<Vec<i64>> {
        let path = format!("/_apis/test/Plans/{}/Suites/{}/points", plan_id, suite_id);
        let points: ListResponse<TestPoint> = self.get(&path).await?;
        Ok(points.value.into_iter().map(|p| p.id).collect())
    }

    /// Create an automated run over the given points, returning its id
    pub async fn create_run(
        &self,
        plan_name: &str,
        suite_name: &str,
        plan_id: i64,
        point_ids: &[i64],
    ) -> Result<i64> {
        let request = CreateRunRequest {
            name: format!("{} - {}", self.run_name_prefix, suite_name),
            plan: PlanRef { id: plan_id },
            point_ids: point_ids.to_vec(),
            automated: true,
            comment: run_comment(plan_name, suite_name, &utc_timestamp()),
        };

        let run: TestRun = self.post(RUNS_PATH, &request).await?;
        tracing::info!("Test Run created Successfully in ADO. Run ID: {}", run.id);
        Ok(run.id)
    }

    /// Fetch the result records the service created for a run
    pub async fn fetch_placeholders(&self, run_id: i64) -> Result<Vec<PlaceholderResult>> {
        let placeholders: ListResponse<PlaceholderResult> =
            self.get(&results_path(run_id)).await?;
        Ok(placeholders.value)
    }

    /// Fetch a run's placeholders and merge local results into them
    pub async fn merge_results(
        &self,
        run_id: i64,
        local: &HashMap<String, LocalResult>,
    ) -> Result<MergeOutcome> {
        let placeholders = self.fetch_placeholders(run_id).await?;
        Ok(results::merge(&placeholders, local, &self.defaults))
    }

    /// Submit merged records to a run
    pub async fn submit_results(&self, run_id: i64, records: &[ResultRecord]) -> Result<()> {
        self.patch(&results_path(run_id), records, "posting test results to ADO")
            .await?;
        tracing::info!("Test Results Posted Successfully to ADO Run ID: {}", run_id);
        Ok(())
    }

    /// Close a run, flagging it for investigation if any result failed
    pub async fn complete_run(&self, run_id: i64, failure_observed: bool) -> Result<RunState> {
        let state = RunState::from_failure(failure_observed);
        let request = UpdateRunRequest {
            state,
            completed_date: utc_timestamp(),
        };

        self.patch(
            &format!("{}/{}", RUNS_PATH, run_id),
            &request,
            "completing the test run in ADO",
        )
        .await?;
        tracing::info!("Test Run for Run ID: {} marked '{}' in ADO", run_id, state);
        Ok(state)
    }
}

fn results_path(run_id: i64) -> String {
    format!("{}/{}/results", RUNS_PATH, run_id)
}

/// First entity whose name matches exactly, in server order
pub fn find_by_name(entities: &[NamedEntity], name: &str) -> Option<i64> {
    entities.iter().find(|e| e.name == name).map(|e| e.id)
}

/// Human-readable comment attached to a new run
pub fn run_comment(plan_name: &str, suite_name: &str, timestamp: &str) -> String {
    format!(
        "Automation Test Run Execution:\n- TestPlanName : {}\n- TestSuiteName : {}\n- Timestamp : {}",
        plan_name, suite_name, timestamp
    )
}

/// Copy of `headers` with credentials masked for logging
fn redacted(headers: &HeaderMap) -> HeaderMap {
    let mut headers = headers.clone();
    if headers.contains_key(AUTHORIZATION) {
        headers.insert(AUTHORIZATION, HeaderValue::from_static("<redacted>"));
    }
    headers
}
