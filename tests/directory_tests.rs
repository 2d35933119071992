use docassist_client::directory::AppointmentCreate;
use docassist_client::error::Error;
use docassist_client::DocAssist;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn availability_queries_the_requested_day() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/doctors/3/availability_direct/"))
        .and(query_param("date", "2025-07-02"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "doctor_name": "Dr. Ahuja",
            "date": "2025-07-02",
            "available_slots": ["09:00", "09:30", "16:30"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = DocAssist::new(&server.uri());
    let availability = client.directory().availability(3, "2025-07-02").await.unwrap();

    assert_eq!(availability.doctor_name, "Dr. Ahuja");
    assert_eq!(availability.available_slots.len(), 3);
}

#[tokio::test]
async fn booking_a_taken_slot_surfaces_the_conflict() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/appointments_direct/"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "detail": "Time slot already booked for this doctor."
        })))
        .mount(&server)
        .await;

    let client = DocAssist::new(&server.uri());
    let result = client
        .directory()
        .book_appointment(&AppointmentCreate {
            doctor_id: 3,
            patient_id: 7,
            appointment_date: "2025-07-02T09:30:00".to_string(),
            time_slot: "09:30".to_string(),
            notes: None,
        })
        .await;

    match result {
        Err(Error::Api { status, detail }) => {
            assert_eq!(status, 409);
            assert_eq!(detail, "Time slot already booked for this doctor.");
        }
        other => panic!("expected a conflict error, got {:?}", other.map(|a| a.id)),
    }
}

#[tokio::test]
async fn list_doctors_forwards_paging() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/doctors/"))
        .and(query_param("skip", "10"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 11, "name": "Dr. Ahuja", "specialty": "Cardiology",
             "email": "ahuja@clinic.example"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = DocAssist::new(&server.uri());
    let doctors = client.directory().list_doctors(Some(10), Some(5)).await.unwrap();

    assert_eq!(doctors.len(), 1);
    assert_eq!(doctors[0].specialty, "Cardiology");
}
