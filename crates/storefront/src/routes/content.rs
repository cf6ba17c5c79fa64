//! Static info page route handlers.
//!
//! The copy lives here in both languages; these pages change rarely enough
//! that a content pipeline would be overhead.

use axum::Json;
use serde::Serialize;
use tower_sessions::Session;
use tracing::instrument;

use bazaar_core::Language;

use crate::models::session;
use crate::routes::PageMeta;

/// Static info page view model.
#[derive(Debug, Serialize)]
pub struct ContentView {
    #[serde(flatten)]
    pub meta: PageMeta,
    pub slug: &'static str,
    pub title: &'static str,
    pub paragraphs: &'static [&'static str],
}

async fn page(
    session: &Session,
    slug: &'static str,
    copy: fn(Language) -> (&'static str, &'static [&'static str]),
) -> Json<ContentView> {
    let language = session::language(session).await;
    let (title, paragraphs) = copy(language);
    Json(ContentView {
        meta: PageMeta::load(session).await,
        slug,
        title,
        paragraphs,
    })
}

/// Display the contact page.
#[instrument(skip(session))]
pub async fn contact(session: Session) -> Json<ContentView> {
    page(&session, "contact", |language| match language {
        Language::Ua => (
            "Контакти",
            &[
                "Служба підтримки Bazaar працює щодня з 9:00 до 21:00.",
                "Телефон: 0 800 330 330 (безкоштовно по Україні).",
                "Електронна пошта: support@bazaar.ua. Відповідаємо протягом одного робочого дня.",
            ],
        ),
        Language::Ru => (
            "Контакты",
            &[
                "Служба поддержки Bazaar работает ежедневно с 9:00 до 21:00.",
                "Телефон: 0 800 330 330 (бесплатно по Украине).",
                "Электронная почта: support@bazaar.ua. Отвечаем в течение одного рабочего дня.",
            ],
        ),
    })
    .await
}

/// Display the delivery and payment page.
#[instrument(skip(session))]
pub async fn delivery_payment(session: Session) -> Json<ContentView> {
    page(&session, "delivery-payment", |language| match language {
        Language::Ua => (
            "Доставка і оплата",
            &[
                "Самовивіз із пунктів видачі продавців безкоштовний.",
                "Кур'єрська доставка по місту коштує 149 грн; для замовлень за програмою SMART вона безкоштовна.",
                "Доставка у відділення Нової Пошти коштує 72 грн, Укрпошта доставляє безкоштовно.",
                "Оплатити можна при отриманні або карткою онлайн через захищену платіжну сторінку.",
            ],
        ),
        Language::Ru => (
            "Доставка и оплата",
            &[
                "Самовывоз из пунктов выдачи продавцов бесплатный.",
                "Курьерская доставка по городу стоит 149 грн; для заказов по программе SMART она бесплатна.",
                "Доставка в отделение Новой Почты стоит 72 грн, Укрпочта доставляет бесплатно.",
                "Оплатить можно при получении или картой онлайн через защищённую платёжную страницу.",
            ],
        ),
    })
    .await
}

/// Display the exchange and return page.
#[instrument(skip(session))]
pub async fn exchange_return(session: Session) -> Json<ContentView> {
    page(&session, "exchange-return", |language| match language {
        Language::Ua => (
            "Обмін і повернення",
            &[
                "Відповідно до Закону України «Про захист прав споживачів» ви можете повернути непродовольчий товар належної якості протягом 14 календарних днів, не враховуючи дня купівлі.",
                "Товар приймається до повернення, якщо збережено товарний вигляд і упаковку, а також пломби, ярлики і бирки.",
                "Кошти повертаються тим самим способом, яким було сплачено замовлення, протягом 3-5 робочих днів після отримання товару продавцем.",
            ],
        ),
        Language::Ru => (
            "Обмен и возврат",
            &[
                "Согласно Закону Украины «О защите прав потребителей» вы можете вернуть непродовольственный товар надлежащего качества в течение 14 календарных дней, не считая дня покупки.",
                "Товар принимается к возврату, если сохранены товарный вид и упаковка, а также пломбы, ярлыки и бирки.",
                "Средства возвращаются тем же способом, которым был оплачен заказ, в течение 3-5 рабочих дней после получения товара продавцом.",
            ],
        ),
    })
    .await
}

/// Display the about page.
#[instrument(skip(session))]
pub async fn about(session: Session) -> Json<ContentView> {
    page(&session, "about", |language| match language {
        Language::Ua => (
            "Про нас",
            &[
                "Bazaar — український маркетплейс, який об'єднує тисячі продавців і мільйони товарів в одному місці.",
                "Ми перевіряємо продавців, захищаємо покупки та допомагаємо вирішувати спірні питання.",
            ],
        ),
        Language::Ru => (
            "О нас",
            &[
                "Bazaar — украинский маркетплейс, который объединяет тысячи продавцов и миллионы товаров в одном месте.",
                "Мы проверяем продавцов, защищаем покупки и помогаем решать спорные вопросы.",
            ],
        ),
    })
    .await
}

/// Display the terms of use page.
#[instrument(skip(session))]
pub async fn terms(session: Session) -> Json<ContentView> {
    page(&session, "terms", |language| match language {
        Language::Ua => (
            "Умови використання",
            &[
                "Користуючись сайтом, ви погоджуєтеся з цими умовами та політикою обробки персональних даних.",
                "Продавці самостійно відповідають за опис, якість і наявність товарів у своїх магазинах.",
                "Bazaar виступає технологічною платформою та посередником у розрахунках між покупцем і продавцем.",
            ],
        ),
        Language::Ru => (
            "Условия использования",
            &[
                "Пользуясь сайтом, вы соглашаетесь с этими условиями и политикой обработки персональных данных.",
                "Продавцы самостоятельно отвечают за описание, качество и наличие товаров в своих магазинах.",
                "Bazaar выступает технологической платформой и посредником в расчётах между покупателем и продавцом.",
            ],
        ),
    })
    .await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use super::*;

    fn test_session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn test_copy_follows_selected_language() {
        let session = test_session();

        let Json(view) = contact(session.clone()).await;
        assert_eq!(view.title, "Контакти");
        assert_eq!(view.slug, "contact");

        session::set_language(&session, Language::Ru).await.unwrap();
        let Json(view) = contact(session).await;
        assert_eq!(view.title, "Контакты");
    }

    #[tokio::test]
    async fn test_every_page_has_paragraphs() {
        let session = test_session();

        for view in [
            contact(session.clone()).await.0,
            delivery_payment(session.clone()).await.0,
            exchange_return(session.clone()).await.0,
            about(session.clone()).await.0,
            terms(session.clone()).await.0,
        ] {
            assert!(!view.paragraphs.is_empty(), "{} has no copy", view.slug);
        }
    }
}
