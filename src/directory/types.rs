//! Types for the doctor/patient directory and direct booking endpoints

use serde::{Deserialize, Serialize};

/// A doctor profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    /// The doctor ID
    pub id: i64,

    /// Full name
    pub name: String,

    /// Specialty
    pub specialty: String,

    /// Contact email
    pub email: String,
}

/// Payload for creating a doctor profile
#[derive(Debug, Clone, Serialize)]
pub struct DoctorCreate {
    pub name: String,
    pub specialty: String,
    pub email: String,
}

/// A patient profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    /// The patient ID
    pub id: i64,

    /// Full name
    pub name: String,

    /// Contact email
    pub email: String,

    /// Phone number, if known
    pub phone_number: Option<String>,

    /// Linked account ID, when the patient has registered
    pub user_id: Option<i64>,
}

/// Payload for creating a patient profile
#[derive(Debug, Clone, Serialize)]
pub struct PatientCreate {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

/// A booked appointment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    /// The appointment ID
    pub id: i64,

    /// The doctor ID
    pub doctor_id: i64,

    /// The patient ID
    pub patient_id: i64,

    /// Appointment date, ISO formatted
    pub appointment_date: String,

    /// Time slot in HH:MM
    pub time_slot: String,

    /// Booking status (pending, confirmed, completed)
    pub status: String,

    /// Free-form notes
    pub notes: Option<String>,

    /// Calendar event linked by the backend, if any
    pub google_calendar_event_id: Option<String>,
}

/// Payload for booking an appointment directly, without the assistant
#[derive(Debug, Clone, Serialize)]
pub struct AppointmentCreate {
    pub doctor_id: i64,
    pub patient_id: i64,
    pub appointment_date: String,
    pub time_slot: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Open slots for one doctor on one day
#[derive(Debug, Clone, Deserialize)]
pub struct DayAvailability {
    /// The doctor's name
    pub doctor_name: String,

    /// The day queried, YYYY-MM-DD
    pub date: String,

    /// Free time slots in HH:MM, ascending
    pub available_slots: Vec<String>,
}

/// Activity summary for one doctor
#[derive(Debug, Clone, Deserialize)]
pub struct SummaryReport {
    /// The doctor's name
    pub doctor_name: String,

    /// Completed appointments overall
    pub total_patients_visited: i64,

    /// Open appointments today
    pub appointments_today: i64,

    /// Appointments yesterday, any state
    pub appointments_yesterday: i64,

    /// When the report was generated, ISO formatted
    pub report_generated_at: String,
}
