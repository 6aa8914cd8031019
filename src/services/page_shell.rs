use std::future::Future;

use futures_util::join;
use serde::Serialize;

use crate::models::layout::{Footer, Header, Logo, MenuItem};
use crate::models::product_category::ProductCategory;
use crate::state::app_state::AppState;

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NavItem {
    pub name: String,
    pub path: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sub_items: Vec<NavItem>,
}

/// Navigation and chrome shared by every page.
#[derive(Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct PageShell {
    pub header: Header,
    pub footer: Footer,
    pub logo: Logo,
    pub logo_src: String,
    pub menu: Vec<NavItem>,
    pub categories: Vec<ProductCategory>,
}

// (name fragment, fixed route), matched case-insensitively in this order.
const PATH_OVERRIDES: [(&str, &str); 4] = [
    ("about", "/about-us"),
    ("blog", "/blogs"),
    ("products", "/products"),
    ("contact", "/contact-us"),
];

/// Apply the fixed routes and hang the product categories under "Products".
pub fn compose_menu(items: Vec<MenuItem>, categories: &[ProductCategory]) -> Vec<NavItem> {
    items
        .into_iter()
        .map(|item| {
            let lowered = item.name.to_lowercase();
            let path = PATH_OVERRIDES
                .iter()
                .find(|(fragment, _)| lowered.contains(fragment))
                .map(|(_, path)| path.to_string())
                .unwrap_or(item.path);

            let sub_items = if lowered.contains("products") {
                categories
                    .iter()
                    .map(|category| NavItem {
                        name: category.category.clone(),
                        path: format!("/{}", category.slug),
                        sub_items: Vec::new(),
                    })
                    .collect()
            } else {
                Vec::new()
            };

            NavItem {
                name: item.name,
                path,
                sub_items,
            }
        })
        .collect()
}

/// Await a section fetch, falling back to its empty value on failure.
pub async fn or_empty<T, F>(section: &str, fetch: F) -> T
where
    T: Default,
    F: Future<Output = anyhow::Result<T>>,
{
    match fetch.await {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Page shell section {} unavailable: {:#}", section, e);
            T::default()
        }
    }
}

/// Fetch header, footer, menu, categories and logo concurrently.
/// A failing section renders empty; the shell itself never fails.
pub async fn load_shell(state: &AppState) -> PageShell {
    let (header, footer, menu, categories, logo) = join!(
        or_empty("header", state.layout.header()),
        or_empty("footer", state.layout.footer()),
        or_empty("menu", state.layout.menu()),
        or_empty("categories", state.product_categories.all()),
        or_empty("logo", state.layout.logo()),
    );

    let logo = logo.unwrap_or_default();
    let logo_src = if logo.photo.trim().is_empty() {
        String::new()
    } else {
        state.settings.image_url(&logo.photo)
    };

    PageShell {
        header: header.unwrap_or_default(),
        footer: footer.unwrap_or_default(),
        menu: compose_menu(menu, &categories),
        logo,
        logo_src,
        categories,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::Settings;
    use crate::db::memory_store::MemoryStore;
    use crate::db::mongodb::{HEADERS, MENUS, PRODUCT_CATEGORIES};
    use std::sync::Arc;

    fn categories() -> Vec<ProductCategory> {
        vec![
            ProductCategory::new("Reactive Dyes".into(), "reactive-dyes".into()),
            ProductCategory::new("Dye Intermediate".into(), "dye-intermediate".into()),
        ]
    }

    #[test]
    fn menu_paths_are_overridden_by_name() {
        let menu = compose_menu(
            vec![
                MenuItem::new("Home", "/", 0),
                MenuItem::new("ABOUT Company", "/about", 1),
                MenuItem::new("Our Blog", "/news", 2),
                MenuItem::new("Contact", "/reach-us", 3),
                MenuItem::new("Careers", "/careers", 4),
            ],
            &categories(),
        );
        let paths: Vec<&str> = menu.iter().map(|m| m.path.as_str()).collect();
        assert_eq!(paths, vec!["/", "/about-us", "/blogs", "/contact-us", "/careers"]);
        assert!(menu.iter().all(|m| m.sub_items.is_empty()));
    }

    #[test]
    fn products_item_gets_category_sub_items() {
        let menu = compose_menu(vec![MenuItem::new("Our Products", "/p", 0)], &categories());
        assert_eq!(menu[0].path, "/products");
        assert_eq!(
            menu[0].sub_items,
            vec![
                NavItem {
                    name: "Reactive Dyes".into(),
                    path: "/reactive-dyes".into(),
                    sub_items: vec![],
                },
                NavItem {
                    name: "Dye Intermediate".into(),
                    path: "/dye-intermediate".into(),
                    sub_items: vec![],
                },
            ]
        );
    }

    #[actix_web::test]
    async fn failing_sections_degrade_to_empty() {
        let store = Arc::new(MemoryStore::default());
        *store.menu.lock().unwrap() = vec![MenuItem::new("Products", "/products", 0)];
        for category in categories() {
            store.add_product_category(category);
        }
        store.fail(HEADERS);
        store.fail(PRODUCT_CATEGORIES);
        let state = AppState::new(Settings::default(), store.clone());

        let shell = load_shell(&state).await;
        assert!(shell.header.phone.is_empty());
        assert!(shell.categories.is_empty());
        assert_eq!(shell.menu.len(), 1);
        assert!(shell.menu[0].sub_items.is_empty());

        store.fail(MENUS);
        assert!(load_shell(&state).await.menu.is_empty());
    }

    #[actix_web::test]
    async fn logo_is_served_from_the_image_base() {
        let store = Arc::new(MemoryStore::default());
        *store.logo.lock().unwrap() = Some(Logo {
            id: None,
            photo: "logo.png".into(),
            alt: "Chemsite".into(),
        });
        let state = AppState::new(Settings::default(), store);
        let shell = load_shell(&state).await;
        assert_eq!(shell.logo_src, "http://localhost:8080/uploads/logo.png");
    }
}
