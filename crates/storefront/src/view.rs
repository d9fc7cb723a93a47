//! Product view coordination.
//!
//! A [`ViewCoordinator`] owns the interactive state of one product page: the
//! image on display, the chosen size and the chosen color. The state travels in
//! the query string, so every link on the page encodes the state that follows
//! from clicking it. Color clicks go through a [`SingleSelect`], whose change
//! notification updates the accent used to tint the duplicate product image.

use serde::{Deserialize, Serialize};
use simplebrand_core::{BasketEntry, Fetch, Product, ProductId, SingleSelect};

use crate::routes::paths;

/// Site title used when a page has none of its own.
pub const DEFAULT_TITLE: &str = "SimpleBrand";

/// Number of placeholder cards shown while the recommended panel loads.
pub const RECOMMENDED_SKELETON_COUNT: usize = 3;

/// Resolve the document title, falling back to the site title.
#[must_use]
pub fn document_title(title: Option<&str>) -> String {
    match title {
        Some(title) if !title.is_empty() => title.to_string(),
        _ => DEFAULT_TITLE.to_string(),
    }
}

/// Title of a product page; `View Item` until the product is known.
#[must_use]
pub fn product_title(product: Option<&Product>) -> String {
    let name = product
        .map(|p| p.name.as_str())
        .filter(|name| !name.is_empty())
        .unwrap_or("Item");
    document_title(Some(&format!("View {name}")))
}

/// CSS filter that tints an image with the accent color.
#[must_use]
pub fn drop_shadow(color: &str) -> String {
    format!("drop-shadow(0px 10px 10px {color})")
}

/// Product view state as carried in the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewQuery {
    pub image: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
}

impl ViewQuery {
    /// Encode as a query string (without the leading `?`).
    #[must_use]
    pub fn to_query_string(&self) -> String {
        [
            ("image", &self.image),
            ("size", &self.size),
            ("color", &self.color),
        ]
        .into_iter()
        .filter_map(|(key, value)| {
            value
                .as_deref()
                .filter(|v| !v.is_empty())
                .map(|v| format!("{key}={}", urlencoding::encode(v)))
        })
        .collect::<Vec<_>>()
        .join("&")
    }
}

/// Append a query string to a path, if non-empty.
pub(crate) fn with_query(path: String, query: &str) -> String {
    if query.is_empty() {
        path
    } else {
        format!("{path}?{query}")
    }
}

/// A color swatch in the color chooser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorOption {
    pub value: String,
    pub active: bool,
    /// Page state after clicking this swatch.
    pub href: String,
}

/// An entry in the size picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeOption {
    pub value: String,
    pub selected: bool,
}

/// A thumbnail in the image collection strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageOption {
    pub url: String,
    pub selected: bool,
    pub href: String,
}

/// Data for the add/remove basket button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasketButton {
    pub product_id: String,
    pub size: String,
    pub color: String,
    pub in_basket: bool,
}

impl BasketButton {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        if self.in_basket {
            "Remove From Basket"
        } else {
            "Add To Basket"
        }
    }
}

/// A product tile in a showcase grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard {
    pub name: String,
    pub brand: String,
    pub price: String,
    pub image: String,
    pub href: String,
}

impl From<&Product> for ProductCard {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            brand: product.brand.clone(),
            price: product.price.display(),
            image: product.image.clone(),
            href: paths::product(&product.id),
        }
    }
}

/// The recommended-products panel and the request that fills it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendedPanel {
    pub products: Fetch<Vec<ProductCard>>,
    /// Fragment URL used for the initial load and for "Try Again".
    pub href: String,
    pub skeleton_count: usize,
}

impl RecommendedPanel {
    /// Panel waiting for its first load.
    #[must_use]
    pub fn pending(product_id: &ProductId) -> Self {
        Self::with_products(product_id, Fetch::Pending)
    }

    #[must_use]
    pub fn with_products(product_id: &ProductId, products: Fetch<Vec<ProductCard>>) -> Self {
        Self {
            products,
            href: paths::product_recommended(product_id),
            skeleton_count: RECOMMENDED_SKELETON_COUNT,
        }
    }

    /// Placeholder indices for the loading skeleton.
    #[must_use]
    pub fn skeletons(&self) -> std::ops::Range<usize> {
        0..self.skeleton_count
    }
}

/// Everything the product detail template renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub description: String,
    pub price: String,
    pub selected_image: String,
    pub images: Vec<ImageOption>,
    pub sizes: Vec<SizeOption>,
    pub colors: Vec<ColorOption>,
    /// Accent tint for the duplicate image; `None` hides the duplicate.
    pub accent: Option<String>,
    pub basket: BasketButton,
    /// Hidden inputs carried by the size form.
    pub image_param: String,
    pub color_param: String,
    pub form_action: String,
}

/// Coordinates the interactive state of one product view.
#[derive(Debug, Clone)]
pub struct ViewCoordinator {
    product: Product,
    selected_image: String,
    selected_size: Option<String>,
    colors: SingleSelect<String>,
    accent: Option<String>,
}

impl ViewCoordinator {
    /// Build the view state for `product` from the request query.
    ///
    /// Values that do not belong to the product are dropped: an unknown image
    /// falls back to the primary image, an unknown size or color to none.
    #[must_use]
    pub fn new(product: Product, query: ViewQuery) -> Self {
        let selected_image = query
            .image
            .filter(|url| product.has_image(url))
            .unwrap_or_else(|| product.image.clone());
        let selected_size = query.size.filter(|size| product.has_size(size));
        let colors = SingleSelect::with_selection(product.available_colors.clone(), query.color);

        let mut coordinator = Self {
            product,
            selected_image,
            selected_size,
            colors,
            accent: None,
        };
        let initial = coordinator.colors.selected().cloned();
        coordinator.on_selected_color_change(initial);
        coordinator
    }

    #[must_use]
    pub fn selected_image(&self) -> &str {
        &self.selected_image
    }

    #[must_use]
    pub fn selected_size(&self) -> Option<&str> {
        self.selected_size.as_deref()
    }

    #[must_use]
    pub fn selected_color(&self) -> Option<&str> {
        self.colors.selected().map(String::as_str)
    }

    #[must_use]
    pub fn accent(&self) -> Option<&str> {
        self.accent.as_deref()
    }

    /// Show a different image. Ignored if it is not one of the product's images.
    pub fn select_image(&mut self, url: &str) {
        if self.product.has_image(url) {
            self.selected_image = url.to_string();
        }
    }

    /// Choose a size. Ignored if the product does not come in it.
    pub fn select_size(&mut self, size: &str) {
        if self.product.has_size(size) {
            self.selected_size = Some(size.to_string());
        }
    }

    /// Handle a click on a color swatch.
    pub fn click_color(&mut self, color: &str) {
        let mut change = None;
        self.colors
            .click(&color.to_string(), |selected| change = Some(selected.cloned()));
        if let Some(selected) = change {
            self.on_selected_color_change(selected);
        }
    }

    /// Color chooser callback: a set color becomes the accent, a cleared one removes it.
    fn on_selected_color_change(&mut self, color: Option<String>) {
        self.accent = color.filter(|c| !c.is_empty());
    }

    /// The basket entry for the current selection.
    ///
    /// Without a chosen size this uses the product's first declared size,
    /// which is not necessarily the first size shown in the picker.
    #[must_use]
    pub fn basket_entry(&self) -> BasketEntry {
        BasketEntry::new(
            &self.product,
            self.selected_size(),
            self.selected_color(),
        )
    }

    /// Current state as query parameters.
    #[must_use]
    pub fn query(&self) -> ViewQuery {
        ViewQuery {
            image: (self.selected_image != self.product.image).then(|| self.selected_image.clone()),
            size: self.selected_size.clone(),
            color: self.selected_color().map(str::to_owned),
        }
    }

    /// URL of the page in its current state.
    #[must_use]
    pub fn href(&self) -> String {
        with_query(
            paths::product(&self.product.id),
            &self.query().to_query_string(),
        )
    }

    /// URL of the detail fragment in its current state.
    #[must_use]
    pub fn detail_href(&self) -> String {
        with_query(
            paths::product_detail(&self.product.id),
            &self.query().to_query_string(),
        )
    }

    /// Color swatches, each linking to the state its click produces.
    #[must_use]
    pub fn color_options(&self) -> Vec<ColorOption> {
        self.colors
            .options()
            .map(|option| {
                let mut next = self.clone();
                next.click_color(option.value);
                ColorOption {
                    value: option.value.clone(),
                    active: option.active,
                    href: next.href(),
                }
            })
            .collect()
    }

    /// Sizes in ascending order, as the picker shows them.
    #[must_use]
    pub fn size_options(&self) -> Vec<SizeOption> {
        self.product
            .sorted_sizes()
            .into_iter()
            .map(|size| SizeOption {
                value: size.to_string(),
                selected: self.selected_size() == Some(size),
            })
            .collect()
    }

    /// Thumbnails of the image collection.
    #[must_use]
    pub fn image_options(&self) -> Vec<ImageOption> {
        self.product
            .image_collection
            .iter()
            .map(|image| {
                let mut next = self.clone();
                next.select_image(&image.url);
                ImageOption {
                    url: image.url.clone(),
                    selected: image.url == self.selected_image,
                    href: next.href(),
                }
            })
            .collect()
    }

    /// Assemble the template data.
    #[must_use]
    pub fn render(&self, in_basket: bool) -> ProductView {
        let query = self.query();
        ProductView {
            id: self.product.id.to_string(),
            name: self.product.name.clone(),
            brand: self.product.brand.clone(),
            description: self.product.description.clone(),
            price: self.product.price.display(),
            selected_image: self.selected_image().to_string(),
            images: self.image_options(),
            sizes: self.size_options(),
            colors: self.color_options(),
            accent: self.accent().map(str::to_owned),
            basket: BasketButton {
                product_id: self.product.id.to_string(),
                size: self.selected_size.clone().unwrap_or_default(),
                color: self.selected_color().unwrap_or_default().to_string(),
                in_basket,
            },
            image_param: query.image.unwrap_or_default(),
            color_param: query.color.unwrap_or_default(),
            form_action: paths::product(&self.product.id),
        }
    }
}
