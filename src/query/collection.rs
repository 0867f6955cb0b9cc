//! # Supported Collections
//!
//! The fixed allow-list of CRM object collections that may be searched.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Collection category, used for grouping in documentation output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionCategory {
    Standard,
    Ecommerce,
    Engagement,
    Other,
}

/// A searchable CRM object collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Contacts,
    Companies,
    Deals,
    Tickets,
    Products,
    LineItems,
    Quotes,
    Invoices,
    Orders,
    Carts,
    Calls,
    Emails,
    Meetings,
    Notes,
    Tasks,
    Communications,
    PostalMail,
    FeedbackSubmissions,
    GoalTargets,
    Leads,
}

impl Collection {
    /// Every supported collection, in documentation order
    pub const ALL: [Collection; 20] = [
        Collection::Contacts,
        Collection::Companies,
        Collection::Deals,
        Collection::Tickets,
        Collection::Products,
        Collection::LineItems,
        Collection::Quotes,
        Collection::Invoices,
        Collection::Orders,
        Collection::Carts,
        Collection::Calls,
        Collection::Emails,
        Collection::Meetings,
        Collection::Notes,
        Collection::Tasks,
        Collection::Communications,
        Collection::PostalMail,
        Collection::FeedbackSubmissions,
        Collection::GoalTargets,
        Collection::Leads,
    ];

    /// Path identifier used by the search backend
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Contacts => "contacts",
            Collection::Companies => "companies",
            Collection::Deals => "deals",
            Collection::Tickets => "tickets",
            Collection::Products => "products",
            Collection::LineItems => "line_items",
            Collection::Quotes => "quotes",
            Collection::Invoices => "invoices",
            Collection::Orders => "orders",
            Collection::Carts => "carts",
            Collection::Calls => "calls",
            Collection::Emails => "emails",
            Collection::Meetings => "meetings",
            Collection::Notes => "notes",
            Collection::Tasks => "tasks",
            Collection::Communications => "communications",
            Collection::PostalMail => "postal_mail",
            Collection::FeedbackSubmissions => "feedback_submissions",
            Collection::GoalTargets => "goal_targets",
            Collection::Leads => "leads",
        }
    }

    pub fn category(&self) -> CollectionCategory {
        match self {
            Collection::Contacts | Collection::Companies | Collection::Deals | Collection::Tickets => {
                CollectionCategory::Standard
            }
            Collection::Products
            | Collection::LineItems
            | Collection::Quotes
            | Collection::Invoices
            | Collection::Orders
            | Collection::Carts => CollectionCategory::Ecommerce,
            Collection::Calls
            | Collection::Emails
            | Collection::Meetings
            | Collection::Notes
            | Collection::Tasks
            | Collection::Communications
            | Collection::PostalMail => CollectionCategory::Engagement,
            Collection::FeedbackSubmissions | Collection::GoalTargets | Collection::Leads => {
                CollectionCategory::Other
            }
        }
    }

    /// Properties requested per item when the caller names none
    pub fn default_properties(&self) -> &'static [&'static str] {
        match self {
            Collection::Contacts => &["email", "firstname", "lastname", "phone", "company"],
            Collection::Companies => &["name", "domain", "industry", "city", "phone"],
            Collection::Deals => &["dealname", "amount", "dealstage", "closedate", "pipeline"],
            Collection::Tickets => &["subject", "content", "hs_pipeline_stage", "hs_ticket_priority"],
            Collection::Products => &["name", "price", "description", "hs_sku"],
            Collection::LineItems => &["name", "quantity", "price", "amount"],
            Collection::Calls => &["hs_call_title", "hs_call_duration", "hs_timestamp"],
            Collection::Emails => &["hs_email_subject", "hs_email_status", "hs_timestamp"],
            Collection::Meetings => &["hs_meeting_title", "hs_meeting_start_time", "hs_meeting_end_time"],
            Collection::Notes => &["hs_note_body", "hs_timestamp"],
            Collection::Tasks => &["hs_task_subject", "hs_task_status", "hs_timestamp"],
            _ => &["hs_object_id", "hs_createdate", "hs_lastmodifieddate"],
        }
    }

    /// Identifiers of every supported collection
    pub fn supported_identifiers() -> Vec<&'static str> {
        Self::ALL.iter().map(Collection::as_str).collect()
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Collection {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.iter().copied().find(|c| c.as_str() == s).ok_or(())
    }
}
