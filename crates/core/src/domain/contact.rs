use serde::{Deserialize, Serialize};

/// Value the shipping picker reports when no card is selected.
pub const SHIPPING_NOT_SELECTED: &str = "Not Selected";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactField {
    MobileNumber,
    CustomerName,
    CityName,
}

impl ContactField {
    /// Id of the form input that receives focus when this field is rejected.
    pub fn input_id(self) -> &'static str {
        match self {
            Self::MobileNumber => "mobileNumber",
            Self::CustomerName => "customerName",
            Self::CityName => "cityName",
        }
    }

    pub fn prompt(self) -> &'static str {
        match self {
            Self::MobileNumber => "Please enter your mobile number",
            Self::CustomerName => "Please enter your name",
            Self::CityName => "Please enter your city or village name",
        }
    }
}

impl std::fmt::Display for ContactField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.input_id())
    }
}

/// Contact fields typed into the RFQ form. Lives for one submission only.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RfqContactInfo {
    pub mobile_number: String,
    pub customer_name: String,
    pub city_name: String,
    #[serde(default)]
    pub shipping_method: Option<String>,
    #[serde(default)]
    pub delivery_pincode: Option<String>,
}

/// Trimmed contact fields that passed validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedContact {
    pub mobile_number: String,
    pub customer_name: String,
    pub city_name: String,
    pub shipping_method: Option<String>,
    pub delivery_pincode: Option<String>,
}

impl RfqContactInfo {
    /// Checks required fields in form order; the first missing one is returned.
    pub fn validate(&self) -> Result<ValidatedContact, ContactField> {
        let mobile_number = required(&self.mobile_number, ContactField::MobileNumber)?;
        let customer_name = required(&self.customer_name, ContactField::CustomerName)?;
        let city_name = required(&self.city_name, ContactField::CityName)?;

        let shipping_method = optional(self.shipping_method.as_deref())
            .filter(|method| method != SHIPPING_NOT_SELECTED);
        let delivery_pincode = optional(self.delivery_pincode.as_deref());

        Ok(ValidatedContact {
            mobile_number,
            customer_name,
            city_name,
            shipping_method,
            delivery_pincode,
        })
    }
}

fn required(value: &str, field: ContactField) -> Result<String, ContactField> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(field);
    }
    Ok(trimmed.to_string())
}

fn optional(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|value| !value.is_empty()).map(str::to_string)
}
