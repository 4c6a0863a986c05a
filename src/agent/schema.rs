//! Typed collected results, one per built-in agent.

use serde::{Deserialize, Deserializer, Serialize};

use crate::valuation::PropertyDetails;

/// Property-search filters gathered by the search agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertySearchFilters {
    pub ubicacion: String,
    pub tipo_de_propiedad: String,
    pub habitaciones: u32,
    pub banos: u32,
    #[serde(default)]
    pub caracteristicas_adicionales: Vec<String>,
    pub rango_de_precio: String,
}

/// Mortgage application gathered by the mortgage agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MortgageApplication {
    pub borrower_info: BorrowerInfo,
    pub mortgage_details: MortgageDetails,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowerInfo {
    #[serde(deserialize_with = "string_or_number")]
    pub monthly_income: String,
}

/// Amounts are kept as the text the applicant gave.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MortgageDetails {
    #[serde(deserialize_with = "string_or_number")]
    pub property_value: String,
    #[serde(deserialize_with = "string_or_number")]
    pub requested_amount: String,
    #[serde(deserialize_with = "string_or_number")]
    pub down_payment: String,
    #[serde(deserialize_with = "string_or_number")]
    pub term: String,
    pub property_type: String,
}

/// Appraisal inputs gathered by the appraisal agent, in the valuation API's
/// field names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppraisalRequest {
    pub lat: f64,
    pub long: f64,
    pub property_family_type_id: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commune_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balcony_area: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parking_lots: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_construction: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warehouse: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub common_expense: Option<f64>,
    pub usable_area: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl From<AppraisalRequest> for PropertyDetails {
    fn from(req: AppraisalRequest) -> Self {
        PropertyDetails {
            latitude: req.lat,
            longitude: req.long,
            property_family_type_id: req.property_family_type_id,
            usable_area: req.usable_area,
            balcony_area: req.balcony_area,
            parking_lots: req.parking_lots,
            bedrooms: req.bedrooms,
            bathrooms: req.bathrooms,
            year_construction: req.year_construction,
            warehouse: req.warehouse,
            common_expense: req.common_expense,
            role: req.role,
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}
