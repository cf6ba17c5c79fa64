//! Checkout form validation.
//!
//! Pure function over the recipient form and delivery selection. Returns a
//! field -> message map; the form is submittable iff the map is empty.
//! Messages come from the i18n catalog in the buyer's language.

use std::collections::BTreeMap;

use bazaar_core::{DeliveryMethod, Email, Language, PhoneNumber, PostalCode};

use crate::checkout::session::{NovaPoshtaSelection, RecipientForm};
use crate::i18n::{Msg, text};

/// Validate the checkout form for the selected delivery method.
///
/// Name, phone, and email are always required. Courier and Ukrposhta also
/// require city and address; Ukrposhta additionally a 5-digit postal code.
/// Nova Poshta ignores the plain address fields and requires a city and
/// branch from the lookup selection instead.
#[must_use]
pub fn validate(
    recipient: &RecipientForm,
    delivery_method: DeliveryMethod,
    nova_poshta: Option<&NovaPoshtaSelection>,
    language: Language,
) -> BTreeMap<String, String> {
    let mut errors = BTreeMap::new();
    let mut fail = |field: &str, msg: Msg| {
        errors.insert(field.to_string(), text(language, msg).to_string());
    };

    if recipient.first_name.trim().is_empty() {
        fail("firstName", Msg::EnterFirstName);
    }
    if recipient.last_name.trim().is_empty() {
        fail("lastName", Msg::EnterLastName);
    }

    if recipient.phone.trim().is_empty() {
        fail("phone", Msg::EnterPhone);
    } else if PhoneNumber::parse(&recipient.phone).is_err() {
        fail("phone", Msg::InvalidPhoneFormat);
    }

    if recipient.email.trim().is_empty() {
        fail("email", Msg::EnterEmail);
    } else if Email::parse(&recipient.email).is_err() {
        fail("email", Msg::InvalidEmailFormat);
    }

    match delivery_method {
        DeliveryMethod::Courier => {
            if recipient.city.trim().is_empty() {
                fail("city", Msg::EnterCity);
            }
            if recipient.address.trim().is_empty() {
                fail("address", Msg::EnterAddress);
            }
        }
        DeliveryMethod::Ukrposhta => {
            if recipient.city.trim().is_empty() {
                fail("city", Msg::EnterCity);
            }
            if recipient.address.trim().is_empty() {
                fail("address", Msg::EnterAddress);
            }
            if recipient.postal_code.trim().is_empty() {
                fail("postalCode", Msg::EnterPostalCode);
            } else if PostalCode::parse(&recipient.postal_code).is_err() {
                fail("postalCode", Msg::PostalCodeFiveDigits);
            }
        }
        DeliveryMethod::NovaPoshta => {
            let selection = nova_poshta;
            if selection.is_none_or(|np| np.city.trim().is_empty()) {
                fail("city", Msg::ChooseCity);
            }
            if selection.is_none_or(|np| np.warehouse.is_none()) {
                fail("warehouse", Msg::ChooseWarehouse);
            }
        }
        DeliveryMethod::SelfPickup => {}
    }

    errors
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bazaar_core::WarehouseRef;

    use super::*;
    use crate::checkout::session::SelectedWarehouse;

    fn filled_recipient() -> RecipientForm {
        RecipientForm {
            first_name: "Оксана".to_string(),
            last_name: "Петренко".to_string(),
            patronymic: String::new(),
            phone: "+380501234567".to_string(),
            email: "oksana@example.com".to_string(),
            city: String::new(),
            address: String::new(),
            postal_code: String::new(),
            comment: String::new(),
        }
    }

    fn np_selection() -> NovaPoshtaSelection {
        NovaPoshtaSelection {
            city: "Київ".to_string(),
            warehouse: Some(SelectedWarehouse {
                warehouse_ref: WarehouseRef::from("wh-1"),
                number: "23".to_string(),
                address: "Відділення №23: вул. Лугова 12".to_string(),
            }),
        }
    }

    #[test]
    fn test_self_pickup_needs_only_contact_fields() {
        let errors = validate(
            &filled_recipient(),
            DeliveryMethod::SelfPickup,
            None,
            Language::Ua,
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn test_on_delivery_passes_without_address_for_pickup() {
        // Address fields stay empty yet validation passes
        let recipient = filled_recipient();
        assert!(recipient.city.is_empty() && recipient.address.is_empty());
        let errors = validate(&recipient, DeliveryMethod::SelfPickup, None, Language::Ua);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_missing_contact_fields_reported_per_field() {
        let errors = validate(
            &RecipientForm::default(),
            DeliveryMethod::SelfPickup,
            None,
            Language::Ua,
        );
        assert_eq!(errors.get("firstName").unwrap(), "Введіть ім'я");
        assert_eq!(errors.get("lastName").unwrap(), "Введіть прізвище");
        assert_eq!(errors.get("phone").unwrap(), "Введіть номер телефону");
        assert_eq!(errors.get("email").unwrap(), "Введіть email");
    }

    #[test]
    fn test_phone_with_country_code_passes() {
        let mut recipient = filled_recipient();
        recipient.phone = "+380501234567".to_string();
        let errors = validate(&recipient, DeliveryMethod::SelfPickup, None, Language::Ua);
        assert!(!errors.contains_key("phone"));
    }

    #[test]
    fn test_phone_too_short_fails() {
        let mut recipient = filled_recipient();
        recipient.phone = "12345".to_string();
        let errors = validate(&recipient, DeliveryMethod::SelfPickup, None, Language::Ua);
        assert_eq!(errors.get("phone").unwrap(), "Невірний формат телефону");
    }

    #[test]
    fn test_masked_phone_passes() {
        // The display mask inserts spaces; validation strips them
        let mut recipient = filled_recipient();
        recipient.phone = "+38 050 123 45 67".to_string();
        let errors = validate(&recipient, DeliveryMethod::SelfPickup, None, Language::Ua);
        assert!(!errors.contains_key("phone"));
    }

    #[test]
    fn test_email_without_domain_dot_fails() {
        let mut recipient = filled_recipient();
        recipient.email = "oksana@localhost".to_string();
        let errors = validate(&recipient, DeliveryMethod::SelfPickup, None, Language::Ua);
        assert_eq!(errors.get("email").unwrap(), "Невірний формат email");
    }

    #[test]
    fn test_courier_requires_city_and_address() {
        let errors = validate(
            &filled_recipient(),
            DeliveryMethod::Courier,
            None,
            Language::Ua,
        );
        assert_eq!(errors.get("city").unwrap(), "Введіть місто");
        assert_eq!(errors.get("address").unwrap(), "Введіть адресу");
    }

    #[test]
    fn test_ukrposhta_postal_code_four_digits_fails() {
        let mut recipient = filled_recipient();
        recipient.city = "Львів".to_string();
        recipient.address = "вул. Зелена 5".to_string();
        recipient.postal_code = "0100".to_string();

        let errors = validate(&recipient, DeliveryMethod::Ukrposhta, None, Language::Ua);
        assert_eq!(
            errors.get("postalCode").unwrap(),
            "Індекс має складатися з 5 цифр"
        );
    }

    #[test]
    fn test_ukrposhta_postal_code_five_digits_passes() {
        let mut recipient = filled_recipient();
        recipient.city = "Львів".to_string();
        recipient.address = "вул. Зелена 5".to_string();
        recipient.postal_code = "01001".to_string();

        let errors = validate(&recipient, DeliveryMethod::Ukrposhta, None, Language::Ua);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_postal_code_error_localized_in_russian() {
        let mut recipient = filled_recipient();
        recipient.city = "Львів".to_string();
        recipient.address = "вул. Зелена 5".to_string();
        recipient.postal_code = "abc12".to_string();

        let errors = validate(&recipient, DeliveryMethod::Ukrposhta, None, Language::Ru);
        assert_eq!(
            errors.get("postalCode").unwrap(),
            "Индекс должен состоять из 5 цифр"
        );
    }

    #[test]
    fn test_nova_poshta_requires_lookup_selection() {
        let errors = validate(
            &filled_recipient(),
            DeliveryMethod::NovaPoshta,
            None,
            Language::Ua,
        );
        assert_eq!(errors.get("city").unwrap(), "Оберіть місто");
        assert_eq!(
            errors.get("warehouse").unwrap(),
            "Оберіть відділення Нової Пошти"
        );
    }

    #[test]
    fn test_nova_poshta_city_without_warehouse_fails() {
        let mut selection = np_selection();
        selection.warehouse = None;

        let errors = validate(
            &filled_recipient(),
            DeliveryMethod::NovaPoshta,
            Some(&selection),
            Language::Ua,
        );
        assert!(!errors.contains_key("city"));
        assert!(errors.contains_key("warehouse"));
    }

    #[test]
    fn test_nova_poshta_full_selection_passes() {
        let errors = validate(
            &filled_recipient(),
            DeliveryMethod::NovaPoshta,
            Some(&np_selection()),
            Language::Ua,
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn test_nova_poshta_ignores_plain_address_fields() {
        // Plain city/address stay empty; only the lookup selection counts
        let recipient = filled_recipient();
        let errors = validate(
            &recipient,
            DeliveryMethod::NovaPoshta,
            Some(&np_selection()),
            Language::Ua,
        );
        assert!(errors.is_empty());
    }
}
