use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shared_config::AppConfig;

pub const DOCTORS_PATH: &str = "/doctors.json";

pub struct TestConfig {
    pub doctors_data_url: String,
    pub port: u16,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            doctors_data_url: format!("http://localhost:54321{}", DOCTORS_PATH),
            port: 0,
        }
    }
}

impl TestConfig {
    /// Point the feed at a running mock server.
    pub fn for_mock_server(mock_server: &MockServer) -> Self {
        Self {
            doctors_data_url: format!("{}{}", mock_server.uri(), DOCTORS_PATH),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            doctors_data_url: self.doctors_data_url.clone(),
            port: self.port,
        }
    }
}

pub struct DoctorFixtures;

impl DoctorFixtures {
    /// A feed entry in the shape the remote file uses.
    pub fn doctor(
        id: &str,
        name: &str,
        fees: &str,
        experience: &str,
        specialities: &[&str],
        video_consult: bool,
        in_clinic: bool,
    ) -> Value {
        let specialities: Vec<Value> = specialities
            .iter()
            .map(|name| json!({ "name": name }))
            .collect();

        json!({
            "id": id,
            "name": name,
            "name_initials": name.chars().next().map(String::from),
            "photo": null,
            "doctor_introduction": format!("{} is an experienced practitioner.", name),
            "specialities": specialities,
            "fees": fees,
            "experience": experience,
            "languages": ["English", "Hindi"],
            "clinic": {
                "name": format!("{} Clinic", name),
                "address": {
                    "locality": "Koramangala",
                    "city": "Bangalore",
                    "address_line1": "12 Main Road",
                    "location": "12.9352,77.6245",
                    "logo_url": null
                }
            },
            "video_consult": video_consult,
            "in_clinic": in_clinic
        })
    }

    pub fn alice() -> Value {
        Self::doctor("1", "Alice", "₹500", "10 Years", &["Cardiology"], true, false)
    }

    pub fn bob() -> Value {
        Self::doctor("2", "Bob", "₹300", "5 Years", &["Dermatology"], false, true)
    }

    pub fn alice_and_bob() -> Value {
        json!([Self::alice(), Self::bob()])
    }

    /// Larger feed with repeated specialties and fees/experience without numbers.
    pub fn clinic_roster() -> Value {
        json!([
            Self::doctor("10", "Dr. Meera Nair", "₹ 800", "18 Years of experience", &["Cardiology", "General Physician"], true, true),
            Self::doctor("11", "Dr. Arjun Rao", "₹ 450", "7 Years of experience", &["Dentist"], false, true),
            Self::doctor("12", "Dr. Sana Khan", "Free", "New", &["Dermatology", "Dentist"], true, false),
            Self::doctor("13", "Dr. Rahul Mehta", "₹ 450", "12 Years of experience", &["ENT"], true, true),
            Self::doctor("14", "Dr. Anand Iyer", "₹ 1,200", "25 Years of experience", &["Cardiology"], false, true),
            Self::doctor("15", "Dr. Anita Desai", "₹ 600", "9 Years of experience", &["Gynaecologist"], true, true),
            Self::doctor("16", "Dr. Ankit Jain", "₹ 350", "3 Years of experience", &["Dentist", "Dentist"], true, false),
            Self::doctor("17", "Dr. Anjali Gupta", "₹ 500", "11 Years of experience", &["Homeopath"], false, true),
        ])
    }
}

/// Serve `body` as the doctor feed, expecting exactly one fetch.
pub async fn mount_doctor_feed(mock_server: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path(DOCTORS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(mock_server)
        .await;
}

pub async fn mount_failing_feed(mock_server: &MockServer, status: u16) {
    Mock::given(method("GET"))
        .and(path(DOCTORS_PATH))
        .respond_with(ResponseTemplate::new(status).set_body_string("unavailable"))
        .expect(1)
        .mount(mock_server)
        .await;
}

pub async fn mount_malformed_feed(mock_server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(DOCTORS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"doctors\": \"not an array\""))
        .expect(1)
        .mount(mock_server)
        .await;
}
