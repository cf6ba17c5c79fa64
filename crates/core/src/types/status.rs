//! Status and method enumerations for marketplace entities.
//!
//! Wire representations match the marketplace backend's JSON contract:
//! statuses and roles are `snake_case`, delivery/payment method codes are
//! `kebab-case`.

use serde::{Deserialize, Serialize};

/// Order lifecycle status.
///
/// Orders are created as `pending`; the backend owns every later
/// transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

/// Payment status attached to an order at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Awaiting an online payment.
    #[default]
    Pending,
    /// Payment collected by the carrier on delivery.
    CashOnDelivery,
    Paid,
    Failed,
}

/// How the buyer pays for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    /// Cash or card at handover.
    #[default]
    OnDelivery,
    /// Hosted payment page (RozetkaPay).
    Online,
    /// Marketplace-branded installment card. Not yet live.
    CardRozetka,
}

impl PaymentMethod {
    /// The wire/code form of the method.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OnDelivery => "on-delivery",
            Self::Online => "online",
            Self::CardRozetka => "card-rozetka",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on-delivery" => Ok(Self::OnDelivery),
            "online" => Ok(Self::Online),
            "card-rozetka" => Ok(Self::CardRozetka),
            _ => Err(format!("invalid payment method: {s}")),
        }
    }
}

/// How the order is delivered to the buyer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DeliveryMethod {
    /// Pickup from the seller's point, free.
    #[default]
    SelfPickup,
    /// Courier to the door.
    Courier,
    /// Pickup from a Nova Poshta warehouse.
    NovaPoshta,
    /// Ukrposhta to a postal address.
    Ukrposhta,
}

impl DeliveryMethod {
    /// The wire/code form of the method.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SelfPickup => "self-pickup",
            Self::Courier => "courier",
            Self::NovaPoshta => "nova-poshta",
            Self::Ukrposhta => "ukrposhta",
        }
    }
}

impl std::fmt::Display for DeliveryMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DeliveryMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "self-pickup" => Ok(Self::SelfPickup),
            "courier" => Ok(Self::Courier),
            "nova-poshta" => Ok(Self::NovaPoshta),
            "ukrposhta" => Ok(Self::Ukrposhta),
            _ => Err(format!("invalid delivery method: {s}")),
        }
    }
}

/// Account role on the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    #[default]
    Customer,
    Seller,
    Admin,
}

impl UserRole {
    /// Landing page after a successful login.
    #[must_use]
    pub const fn home_route(self) -> &'static str {
        match self {
            Self::Customer => "/profile",
            Self::Seller => "/seller/dashboard",
            Self::Admin => "/admin",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Customer => write!(f, "customer"),
            Self::Seller => write!(f, "seller"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Self::Customer),
            "seller" => Ok(Self::Seller),
            "admin" => Ok(Self::Admin),
            _ => Err(format!("invalid user role: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_status_wire_form() {
        assert_eq!(
            serde_json::to_string(&PaymentStatus::CashOnDelivery).unwrap(),
            "\"cash_on_delivery\""
        );
        assert_eq!(
            serde_json::to_string(&PaymentStatus::Pending).unwrap(),
            "\"pending\""
        );
    }

    #[test]
    fn test_delivery_method_wire_form() {
        assert_eq!(
            serde_json::to_string(&DeliveryMethod::NovaPoshta).unwrap(),
            "\"nova-poshta\""
        );
        let parsed: DeliveryMethod = serde_json::from_str("\"self-pickup\"").unwrap();
        assert_eq!(parsed, DeliveryMethod::SelfPickup);
    }

    #[test]
    fn test_payment_method_round_trip() {
        for method in [
            PaymentMethod::OnDelivery,
            PaymentMethod::Online,
            PaymentMethod::CardRozetka,
        ] {
            let parsed: PaymentMethod = method.as_str().parse().unwrap();
            assert_eq!(parsed, method);
        }
    }

    #[test]
    fn test_role_home_routes() {
        assert_eq!(UserRole::Admin.home_route(), "/admin");
        assert_eq!(UserRole::Seller.home_route(), "/seller/dashboard");
        assert_eq!(UserRole::Customer.home_route(), "/profile");
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("seller".parse::<UserRole>().unwrap(), UserRole::Seller);
        assert!("owner".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_order_status_default() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
        assert_eq!(
            serde_json::to_string(&OrderStatus::Pending).unwrap(),
            "\"pending\""
        );
    }
}
