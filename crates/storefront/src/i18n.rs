//! Interface copy in Ukrainian and Russian.
//!
//! Ukrainian is the default language. Every user-facing notice and label
//! rendered by the storefront goes through this catalog; routes never embed
//! literal copy.

use bazaar_core::Language;

/// Message catalog keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Msg {
    // Checkout field errors
    EnterFirstName,
    EnterLastName,
    EnterPhone,
    InvalidPhoneFormat,
    EnterEmail,
    InvalidEmailFormat,
    EnterCity,
    EnterAddress,
    EnterPostalCode,
    PostalCodeFiveDigits,
    ChooseCity,
    ChooseWarehouse,

    // Checkout notices
    FillRequiredFields,
    OrderPlaced,
    RedirectingToPayment,
    PaymentMethodUnavailable,
    ProfileDataApplied,
    CartIsEmpty,

    // Auth notices
    InvalidCredentials,
    UserNotFound,
    LoginFailed,
    EmailTaken,
    RegistrationFailed,
    ServerConnectionError,
    LoginRequired,
    LoggedOut,

    // Delivery option labels
    SelfPickup,
    SelfPickupDesc,
    CourierDelivery,
    CourierDesc,
    SmartFreeNote,
    NovaPoshtaPickup,
    NovaPoshtaDesc,
    UkrposhtaPickup,
    UkrposhtaDesc,
    FreeBadge,

    // Payment option labels
    PayOnDelivery,
    PayOnDeliveryDesc,
    PayOnlineRozetka,
    PayOnlineDesc,
    PayWithBazaarCard,
    PayWithBazaarCardDesc,
    DiscountBadge,
}

/// Look up the copy for a message in the given language.
#[must_use]
pub const fn text(language: Language, msg: Msg) -> &'static str {
    match language {
        Language::Ua => ua(msg),
        Language::Ru => ru(msg),
    }
}

const fn ua(msg: Msg) -> &'static str {
    match msg {
        Msg::EnterFirstName => "Введіть ім'я",
        Msg::EnterLastName => "Введіть прізвище",
        Msg::EnterPhone => "Введіть номер телефону",
        Msg::InvalidPhoneFormat => "Невірний формат телефону",
        Msg::EnterEmail => "Введіть email",
        Msg::InvalidEmailFormat => "Невірний формат email",
        Msg::EnterCity => "Введіть місто",
        Msg::EnterAddress => "Введіть адресу",
        Msg::EnterPostalCode => "Введіть поштовий індекс",
        Msg::PostalCodeFiveDigits => "Індекс має складатися з 5 цифр",
        Msg::ChooseCity => "Оберіть місто",
        Msg::ChooseWarehouse => "Оберіть відділення Нової Пошти",

        Msg::FillRequiredFields => "Будь ласка, заповніть всі обов'язкові поля",
        Msg::OrderPlaced => "Замовлення успішно оформлено!",
        Msg::RedirectingToPayment => "Перенаправлення на сторінку оплати...",
        Msg::PaymentMethodUnavailable => "Цей метод оплати тимчасово недоступний",
        Msg::ProfileDataApplied => "Дані автоматично заповнені!",
        Msg::CartIsEmpty => "Ваш кошик порожній",

        Msg::InvalidCredentials => "Невірний email або пароль",
        Msg::UserNotFound => "Користувача не знайдено",
        Msg::LoginFailed => "Не вдалося увійти",
        Msg::EmailTaken => "Акаунт з таким email вже існує",
        Msg::RegistrationFailed => "Не вдалося створити акаунт",
        Msg::ServerConnectionError => "Помилка підключення до серверу",
        Msg::LoginRequired => "Увійдіть, щоб продовжити",
        Msg::LoggedOut => "Ви вийшли з акаунта",

        Msg::SelfPickup => "Самовивіз",
        Msg::SelfPickupDesc => "Безкоштовно з наших магазинів",
        Msg::CourierDelivery => "Кур'єрська доставка",
        Msg::CourierDesc => "Доставка за вашою адресою",
        Msg::SmartFreeNote => "або безкоштовно зі SMART",
        Msg::NovaPoshtaPickup => "Нова Пошта",
        Msg::NovaPoshtaDesc => "До відділення Нової Пошти",
        Msg::UkrposhtaPickup => "Укрпошта",
        Msg::UkrposhtaDesc => "До відділення Укрпошти",
        Msg::FreeBadge => "Безкоштовно",

        Msg::PayOnDelivery => "Оплата при отриманні",
        Msg::PayOnDeliveryDesc => "Готівкою або карткою при отриманні",
        Msg::PayOnlineRozetka => "Оплатити онлайн",
        Msg::PayOnlineDesc => "Visa, Mastercard через RozetkaPay",
        Msg::PayWithBazaarCard => "Оплата карткою Bazaar",
        Msg::PayWithBazaarCardDesc => "Знижка 3% на перше замовлення",
        Msg::DiscountBadge => "Знижка",
    }
}

const fn ru(msg: Msg) -> &'static str {
    match msg {
        Msg::EnterFirstName => "Введите имя",
        Msg::EnterLastName => "Введите фамилию",
        Msg::EnterPhone => "Введите номер телефона",
        Msg::InvalidPhoneFormat => "Неверный формат телефона",
        Msg::EnterEmail => "Введите email",
        Msg::InvalidEmailFormat => "Неверный формат email",
        Msg::EnterCity => "Введите город",
        Msg::EnterAddress => "Введите адрес",
        Msg::EnterPostalCode => "Введите почтовый индекс",
        Msg::PostalCodeFiveDigits => "Индекс должен состоять из 5 цифр",
        Msg::ChooseCity => "Выберите город",
        Msg::ChooseWarehouse => "Выберите отделение Новой Почты",

        Msg::FillRequiredFields => "Пожалуйста, заполните все обязательные поля",
        Msg::OrderPlaced => "Заказ успешно оформлен!",
        Msg::RedirectingToPayment => "Перенаправление на страницу оплаты...",
        Msg::PaymentMethodUnavailable => "Этот метод оплаты временно недоступен",
        Msg::ProfileDataApplied => "Данные автоматически заполнены!",
        Msg::CartIsEmpty => "Ваша корзина пуста",

        Msg::InvalidCredentials => "Неверный email или пароль",
        Msg::UserNotFound => "Пользователь не найден",
        Msg::LoginFailed => "Не удалось войти",
        Msg::EmailTaken => "Аккаунт с таким email уже существует",
        Msg::RegistrationFailed => "Не удалось создать аккаунт",
        Msg::ServerConnectionError => "Ошибка подключения к серверу",
        Msg::LoginRequired => "Войдите, чтобы продолжить",
        Msg::LoggedOut => "Вы вышли из аккаунта",

        Msg::SelfPickup => "Самовывоз",
        Msg::SelfPickupDesc => "Бесплатно из наших магазинов",
        Msg::CourierDelivery => "Курьерская доставка",
        Msg::CourierDesc => "Доставка по вашему адресу",
        Msg::SmartFreeNote => "или бесплатно со SMART",
        Msg::NovaPoshtaPickup => "Новая Почта",
        Msg::NovaPoshtaDesc => "В отделение Новой Почты",
        Msg::UkrposhtaPickup => "Укрпочта",
        Msg::UkrposhtaDesc => "В отделение Укрпочты",
        Msg::FreeBadge => "Бесплатно",

        Msg::PayOnDelivery => "Оплата при получении",
        Msg::PayOnDeliveryDesc => "Наличными или картой при получении",
        Msg::PayOnlineRozetka => "Оплатить онлайн",
        Msg::PayOnlineDesc => "Visa, Mastercard через RozetkaPay",
        Msg::PayWithBazaarCard => "Оплата картой Bazaar",
        Msg::PayWithBazaarCardDesc => "Скидка 3% на первый заказ",
        Msg::DiscountBadge => "Скидка",
    }
}

/// Payment failure notice with the provider's reason appended.
#[must_use]
pub fn payment_error(language: Language, detail: &str) -> String {
    match language {
        Language::Ua => format!("Помилка оплати: {detail}"),
        Language::Ru => format!("Ошибка оплаты: {detail}"),
    }
}

/// Order submission failure notice with the backend's reason appended.
#[must_use]
pub fn order_error(language: Language, detail: &str) -> String {
    match language {
        Language::Ua => format!("Помилка при оформленні замовлення: {detail}"),
        Language::Ru => format!("Ошибка при оформлении заказа: {detail}"),
    }
}

/// Statement line forwarded to the payment provider.
///
/// Always Ukrainian regardless of the interface language; this is the text
/// the provider prints on receipts.
#[must_use]
pub fn payment_description(order_number: &str) -> String {
    format!("Оплата замовлення {order_number}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ukrainian_is_default_copy() {
        assert_eq!(
            text(Language::Ua, Msg::FillRequiredFields),
            "Будь ласка, заповніть всі обов'язкові поля"
        );
        assert_eq!(
            text(Language::Ua, Msg::OrderPlaced),
            "Замовлення успішно оформлено!"
        );
        assert_eq!(text(Language::Ua, Msg::ChooseCity), "Оберіть місто");
        assert_eq!(
            text(Language::Ua, Msg::ChooseWarehouse),
            "Оберіть відділення Нової Пошти"
        );
    }

    #[test]
    fn test_postal_code_copy_matches_language() {
        assert_eq!(
            text(Language::Ua, Msg::PostalCodeFiveDigits),
            "Індекс має складатися з 5 цифр"
        );
        assert_eq!(
            text(Language::Ru, Msg::PostalCodeFiveDigits),
            "Индекс должен состоять из 5 цифр"
        );
    }

    #[test]
    fn test_payment_description_is_fixed_ukrainian() {
        assert_eq!(
            payment_description("ORDER-1700000000000"),
            "Оплата замовлення ORDER-1700000000000"
        );
    }

    #[test]
    fn test_error_formatting() {
        assert_eq!(
            payment_error(Language::Ua, "card declined"),
            "Помилка оплати: card declined"
        );
        assert_eq!(
            order_error(Language::Ru, "timeout"),
            "Ошибка при оформлении заказа: timeout"
        );
    }
}
