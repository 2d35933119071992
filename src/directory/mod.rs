//! Directory and direct booking client
//!
//! Wraps the backend's non-LLM endpoints: doctor and patient profiles,
//! direct availability checks, direct booking, and the summary report.
//! These endpoints take no bearer token.

mod types;

use reqwest::Client;
use std::collections::HashMap;

use crate::error::Error;
use crate::fetch::Fetch;

pub use types::*;

/// Client for the backend's directory endpoints
#[derive(Clone)]
pub struct Directory {
    /// The base URL for the assistant backend
    url: String,

    /// HTTP client used for requests
    client: Client,
}

impl Directory {
    /// Create a new Directory client
    pub(crate) fn new(url: &str, client: Client) -> Self {
        Self {
            url: url.to_string(),
            client,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.url, path)
    }

    fn paging(skip: Option<usize>, limit: Option<usize>) -> HashMap<String, String> {
        let mut params = HashMap::new();
        if let Some(skip) = skip {
            params.insert("skip".to_string(), skip.to_string());
        }
        if let Some(limit) = limit {
            params.insert("limit".to_string(), limit.to_string());
        }
        params
    }

    /// Create a doctor profile
    pub async fn create_doctor(&self, doctor: &DoctorCreate) -> Result<Doctor, Error> {
        let url = self.endpoint("/doctors/");

        let created = Fetch::post(&self.client, &url)
            .json(doctor)?
            .execute::<Doctor>()
            .await?;

        Ok(created)
    }

    /// List doctor profiles
    pub async fn list_doctors(
        &self,
        skip: Option<usize>,
        limit: Option<usize>,
    ) -> Result<Vec<Doctor>, Error> {
        let url = self.endpoint("/doctors/");

        let doctors = Fetch::get(&self.client, &url)
            .query(Self::paging(skip, limit))
            .execute::<Vec<Doctor>>()
            .await?;

        Ok(doctors)
    }

    /// Fetch one doctor profile by ID
    pub async fn get_doctor(&self, doctor_id: i64) -> Result<Doctor, Error> {
        let url = self.endpoint(&format!("/doctors/{}", doctor_id));

        let doctor = Fetch::get(&self.client, &url).execute::<Doctor>().await?;
        Ok(doctor)
    }

    /// Create a patient profile
    pub async fn create_patient(&self, patient: &PatientCreate) -> Result<Patient, Error> {
        let url = self.endpoint("/patients/");

        let created = Fetch::post(&self.client, &url)
            .json(patient)?
            .execute::<Patient>()
            .await?;

        Ok(created)
    }

    /// List patient profiles
    pub async fn list_patients(
        &self,
        skip: Option<usize>,
        limit: Option<usize>,
    ) -> Result<Vec<Patient>, Error> {
        let url = self.endpoint("/patients/");

        let patients = Fetch::get(&self.client, &url)
            .query(Self::paging(skip, limit))
            .execute::<Vec<Patient>>()
            .await?;

        Ok(patients)
    }

    /// Check a doctor's open slots on a given day, bypassing the assistant
    pub async fn availability(&self, doctor_id: i64, date: &str) -> Result<DayAvailability, Error> {
        let url = self.endpoint(&format!("/doctors/{}/availability_direct/", doctor_id));

        let mut params = HashMap::new();
        params.insert("date".to_string(), date.to_string());

        let availability = Fetch::get(&self.client, &url)
            .query(params)
            .execute::<DayAvailability>()
            .await?;

        Ok(availability)
    }

    /// Book an appointment directly, bypassing the assistant
    ///
    /// A slot already taken surfaces as `Error::Api` with status 409.
    pub async fn book_appointment(
        &self,
        appointment: &AppointmentCreate,
    ) -> Result<Appointment, Error> {
        let url = self.endpoint("/appointments_direct/");

        let booked = Fetch::post(&self.client, &url)
            .json(appointment)?
            .execute::<Appointment>()
            .await?;

        Ok(booked)
    }

    /// Fetch a doctor's activity summary, bypassing the assistant
    pub async fn summary_report(&self, doctor_id: i64) -> Result<SummaryReport, Error> {
        let url = self.endpoint(&format!("/doctors/{}/summary_report_direct/", doctor_id));

        let report = Fetch::get(&self.client, &url)
            .execute::<SummaryReport>()
            .await?;

        Ok(report)
    }
}
