//! Appointment booking form
//!
//! Only the confirmation checkbox is checked. Name, contact and email are
//! echoed back exactly as entered, blanks included.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Doctors offered on the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Doctor {
    #[serde(rename = "Dr. Arshad Ali (Sr. Cardiologist)")]
    ArshadAli,
    #[serde(rename = "Dr. Gul Zavier (Surgeon)")]
    GulZavier,
    #[serde(rename = "Dr. Zarrish Fatima (Physician)")]
    ZarrishFatima,
    #[serde(rename = "Dr. Zaiyaan-ul-Haq (Doctor Medicine)")]
    ZaiyaanUlHaq,
}

impl Doctor {
    pub const ALL: [Doctor; 4] = [
        Doctor::ArshadAli,
        Doctor::GulZavier,
        Doctor::ZarrishFatima,
        Doctor::ZaiyaanUlHaq,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Doctor::ArshadAli => "Dr. Arshad Ali (Sr. Cardiologist)",
            Doctor::GulZavier => "Dr. Gul Zavier (Surgeon)",
            Doctor::ZarrishFatima => "Dr. Zarrish Fatima (Physician)",
            Doctor::ZaiyaanUlHaq => "Dr. Zaiyaan-ul-Haq (Doctor Medicine)",
        }
    }
}

/// Appointment slots offered on the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeSlot {
    #[serde(rename = "09:00am")]
    Morning,
    #[serde(rename = "12:00pm")]
    Noon,
    #[serde(rename = "03:00pm")]
    Afternoon,
    #[serde(rename = "06:00pm")]
    Evening,
}

impl TimeSlot {
    pub const ALL: [TimeSlot; 4] = [
        TimeSlot::Morning,
        TimeSlot::Noon,
        TimeSlot::Afternoon,
        TimeSlot::Evening,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TimeSlot::Morning => "09:00am",
            TimeSlot::Noon => "12:00pm",
            TimeSlot::Afternoon => "03:00pm",
            TimeSlot::Evening => "06:00pm",
        }
    }
}

/// Booking form as submitted
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BookingForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub email: String,
    pub doctor: Doctor,
    pub preferred_time: TimeSlot,
    #[serde(default)]
    pub confirmed: bool,
}

/// Accepted booking, echoing the submitted values
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingConfirmation {
    pub name: String,
    pub contact: String,
    pub email: String,
    pub doctor: Doctor,
    pub preferred_time: TimeSlot,
    pub confirmed_at: DateTime<Utc>,
}

impl BookingConfirmation {
    /// Human-readable summary shown on success
    pub fn summary(&self) -> String {
        format!(
            "Your booking has been confirmed!\n\nName: {}\nContact: {}\nEmail: {}\nDoctor: {}\nPreferred Time: {}",
            self.name,
            self.contact,
            self.email,
            self.doctor.label(),
            self.preferred_time.label(),
        )
    }
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum BookingError {
    #[error("Please confirm your appointment.")]
    NotConfirmed,
}

impl BookingForm {
    /// Accept the form if the confirmation box is ticked
    pub fn submit(self) -> Result<BookingConfirmation, BookingError> {
        if !self.confirmed {
            return Err(BookingError::NotConfirmed);
        }

        Ok(BookingConfirmation {
            name: self.name,
            contact: self.contact,
            email: self.email,
            doctor: self.doctor,
            preferred_time: self.preferred_time,
            confirmed_at: Utc::now(),
        })
    }
}
