//! Typed HTTP client for the HR API, used by `hrctl`.

pub mod views;

use chrono::NaiveDate;
use derive_more::Display;
use reqwest::{Method, RequestBuilder, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::health::HealthResponse;
use crate::error::GENERIC_MESSAGE;
use crate::model::attendance::{
    AttendanceListResponse, AttendanceMark, AttendanceMarkResponse, AttendanceStatus,
    UpsertAttendance,
};
use crate::model::employee::{
    CreateEmployee, Employee, EmployeeFilter, EmployeeListResponse, EmployeeResponse,
};
use crate::validation::DATE_FORMAT;

pub const DEFAULT_BASE_URL: &str = "http://localhost:4000/api";

#[derive(Debug, Display)]
pub enum ClientError {
    #[display(fmt = "invalid base url {:?}", _0)]
    InvalidBaseUrl(String),

    /// No usable response: connection refused, timeout, undecodable success body.
    #[display(fmt = "{}", _0)]
    Transport(reqwest::Error),

    /// The server answered with its error envelope.
    #[display(fmt = "{} ({}): {}", code, status, message)]
    Api {
        status: StatusCode,
        code: String,
        message: String,
        details: Option<Value>,
    },

    /// Non-2xx without a readable envelope.
    #[display(fmt = "request failed with status {}", _0)]
    Unexpected(StatusCode),
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::Transport(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport(err)
    }
}

impl ClientError {
    /// What to show a user: the server's message verbatim when there is one.
    pub fn message(&self) -> String {
        match self {
            ClientError::Api { message, .. } if !message.is_empty() => message.clone(),
            _ => GENERIC_MESSAGE.to_string(),
        }
    }

    /// Machine-readable code from the envelope, if the server sent one.
    pub fn code(&self) -> Option<&str> {
        match self {
            ClientError::Api { code, .. } => Some(code),
            _ => None,
        }
    }
}

// Lenient mirror of the server envelope: unknown codes still deserialize.
#[derive(Deserialize)]
struct Envelope {
    error: EnvelopeBody,
}

#[derive(Deserialize)]
struct EnvelopeBody {
    code: String,
    message: String,
    #[serde(default)]
    details: Option<Value>,
}

#[derive(Clone, Debug)]
pub struct HrClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HrClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_http(reqwest::Client::new(), base_url)
    }

    pub fn with_http(http: reqwest::Client, base_url: &str) -> Result<Self, ClientError> {
        let base_url =
            Url::parse(base_url).map_err(|_| ClientError::InvalidBaseUrl(base_url.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        self.send(self.request(Method::GET, &["health"])?).await
    }

    pub async fn list_employees(
        &self,
        filter: &EmployeeFilter,
    ) -> Result<Vec<Employee>, ClientError> {
        let mut query: Vec<(&str, &str)> = Vec::new();
        if let Some(q) = filter.q() {
            query.push(("q", q));
        }
        if let Some(department) = filter.department() {
            query.push(("department", department));
        }

        let request = self.request(Method::GET, &["employees"])?.query(&query);
        let response: EmployeeListResponse = self.send(request).await?;
        Ok(response.data)
    }

    pub async fn create_employee(&self, input: &CreateEmployee) -> Result<Employee, ClientError> {
        let request = self.request(Method::POST, &["employees"])?.json(input);
        let response: EmployeeResponse = self.send(request).await?;
        Ok(response.data)
    }

    pub async fn delete_employee(&self, employee_id: &str) -> Result<(), ClientError> {
        let request = self.request(Method::DELETE, &["employees", employee_id])?;
        let response = request.send().await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(error_from(response).await)
        }
    }

    pub async fn list_attendance(&self, date: NaiveDate) -> Result<AttendanceListResponse, ClientError> {
        let date = date.format(DATE_FORMAT).to_string();
        let request = self
            .request(Method::GET, &["attendance"])?
            .query(&[("date", date.as_str())]);
        self.send(request).await
    }

    pub async fn upsert_attendance(
        &self,
        employee_id: &str,
        date: NaiveDate,
        status: AttendanceStatus,
    ) -> Result<AttendanceMark, ClientError> {
        let body = UpsertAttendance {
            date: date.format(DATE_FORMAT).to_string(),
            status: status.to_string(),
        };
        let request = self
            .request(Method::PUT, &["attendance", employee_id])?
            .json(&body);
        let response: AttendanceMarkResponse = self.send(request).await?;
        Ok(response.data)
    }

    /// Appends percent-encoded path segments to the base url.
    fn url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder, ClientError> {
        Ok(self.http.request(method, self.url(segments)?))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await?;
        if response.status().is_success() {
            Ok(response.json::<T>().await?)
        } else {
            Err(error_from(response).await)
        }
    }
}

async fn error_from(response: reqwest::Response) -> ClientError {
    let status = response.status();
    let body = match response.bytes().await {
        Ok(body) => body,
        Err(err) => return ClientError::Transport(err),
    };

    match serde_json::from_slice::<Envelope>(&body) {
        Ok(envelope) => ClientError::Api {
            status,
            code: envelope.error.code,
            message: envelope.error.message,
            details: envelope.error.details,
        },
        Err(_) => ClientError::Unexpected(status),
    }
}
