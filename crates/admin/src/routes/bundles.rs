//! Bundle creator and bundle list route handlers.
//!
//! The creator page keeps its form state in the request: the draft's name,
//! description, discount and selected product ids travel in the query string
//! (`GET /bundles`) or the form body (`POST /bundles`). Each action button
//! submits the whole draft plus one of `add`, `remove` or `view`.

use askama::Template;
use axum::{
    Form,
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use bundle_builder_core::{
    BundleDraft, BundlePricing, DEFAULT_DISCOUNT, DISCOUNT_CHOICES, ProductId,
};

use crate::{
    error::AppError,
    filters,
    services::{BundleCatalog, BundleCreateError, ResolvedBundle},
    shopify::CatalogProduct,
    state::AppState,
};

const CREATOR_PATH: &str = "/bundles";
const LIST_PATH: &str = "/bundles/list";

// =============================================================================
// Request Types
// =============================================================================

/// Query parameters for the creator page.
#[derive(Debug, Default, Deserialize)]
pub struct CreatorQuery {
    #[serde(flatten)]
    pub draft: DraftForm,
    /// Product id to append to the selection.
    pub add: Option<String>,
    /// Product id to drop from the selection.
    pub remove: Option<String>,
    /// Bundle id whose details are shown.
    pub view: Option<String>,
    /// Title of a bundle that was just created.
    pub created: Option<String>,
}

/// Query parameters for the list-only page.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Bundle id whose details are shown.
    pub view: Option<String>,
}

/// Draft fields as submitted by the creator form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DraftForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub discount: Option<String>,
    /// Comma separated product ids.
    #[serde(default)]
    pub selected: String,
}

impl DraftForm {
    /// Parse the form into a bundle draft.
    ///
    /// A missing or non-numeric discount falls back to the default; numeric
    /// values are kept as-is.
    #[must_use]
    pub fn to_draft(&self) -> BundleDraft {
        let discount = self
            .discount
            .as_deref()
            .and_then(|d| d.trim().parse::<i64>().ok())
            .unwrap_or(DEFAULT_DISCOUNT);

        BundleDraft {
            name: self.name.clone(),
            description: Some(self.description.clone()).filter(|d| !d.trim().is_empty()),
            product_ids: parse_selection(&self.selected),
            discount,
        }
    }
}

/// Split a comma separated selection into product ids.
fn parse_selection(raw: &str) -> Vec<ProductId> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(ProductId::from)
        .collect()
}

fn join_selection(ids: &[ProductId]) -> String {
    ids.iter()
        .map(ProductId::as_str)
        .collect::<Vec<_>>()
        .join(",")
}

/// Apply the add/remove actions to a draft's selection.
///
/// Adding appends even when the product is already selected; removing drops
/// every occurrence of the id.
fn apply_selection_actions(draft: &mut BundleDraft, add: Option<&str>, remove: Option<&str>) {
    if let Some(id) = add.map(str::trim).filter(|id| !id.is_empty()) {
        draft.product_ids.push(ProductId::from(id));
    }
    if let Some(id) = remove.map(str::trim).filter(|id| !id.is_empty()) {
        draft.product_ids.retain(|selected| selected.as_str() != id);
    }
}

// =============================================================================
// View Types
// =============================================================================

/// Catalog product row.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub id: String,
    pub title: String,
    pub price: String,
}

impl From<&CatalogProduct> for ProductView {
    fn from(product: &CatalogProduct) -> Self {
        Self {
            id: product.id.to_string(),
            title: product.title.clone(),
            price: product.price.display(),
        }
    }
}

/// Bundle row in the bundle table.
#[derive(Debug, Clone)]
pub struct BundleView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub discount: i64,
    pub product_count: usize,
    pub total: String,
    pub discounted: String,
    pub view_href: String,
}

impl BundleView {
    fn new(bundle: &ResolvedBundle, view_base: &str) -> Self {
        let pricing = bundle.pricing();
        Self {
            id: bundle.id.to_string(),
            title: bundle.title.clone(),
            description: bundle.description.clone(),
            discount: bundle.discount,
            product_count: bundle.products.len(),
            total: pricing.total_display(),
            discounted: pricing.discounted_display(),
            view_href: format!(
                "{view_base}view={}",
                urlencoding::encode(bundle.id.as_str())
            ),
        }
    }
}

/// Bundle details shown in the modal.
#[derive(Debug, Clone)]
pub struct BundleDetailView {
    pub bundle: BundleView,
    pub products: Vec<ProductView>,
    pub close_href: String,
}

/// Draft state for the creator form.
#[derive(Debug, Clone)]
pub struct DraftView {
    pub name: String,
    pub description: String,
    pub discount: i64,
    pub selected_joined: String,
    pub selected: Vec<ProductView>,
    /// Create is offered only once something is selected; the name is
    /// checked by the browser and again on submit.
    pub has_selection: bool,
    pub total: String,
    pub discounted: String,
}

impl DraftView {
    fn new(draft: &BundleDraft, products: &[CatalogProduct]) -> Self {
        // Selected ids are resolved against the loaded page of products
        let resolved: Vec<&CatalogProduct> = draft
            .product_ids
            .iter()
            .filter_map(|id| products.iter().find(|p| &p.id == id))
            .collect();
        let pricing = BundlePricing::calculate(resolved.iter().copied().map(|p| &p.price), draft.discount);

        let selected = draft
            .product_ids
            .iter()
            .map(|id| {
                products.iter().find(|p| &p.id == id).map_or_else(
                    || ProductView {
                        id: id.to_string(),
                        title: id.to_string(),
                        price: "-".to_string(),
                    },
                    ProductView::from,
                )
            })
            .collect();

        Self {
            name: draft.name.clone(),
            description: draft.description.clone().unwrap_or_default(),
            discount: draft.discount,
            selected_joined: join_selection(&draft.product_ids),
            selected,
            has_selection: !draft.product_ids.is_empty(),
            total: pricing.total_display(),
            discounted: pricing.discounted_display(),
        }
    }

    /// Query string that reproduces this draft.
    fn query_string(&self) -> String {
        format!(
            "name={}&description={}&discount={}&selected={}",
            urlencoding::encode(&self.name),
            urlencoding::encode(&self.description),
            self.discount,
            urlencoding::encode(&self.selected_joined),
        )
    }
}

/// Build the bundle table and the optional detail modal.
///
/// `page_href` is the page URL (with any state query) the modal closes to.
fn bundle_views(
    bundles: &[ResolvedBundle],
    page_href: &str,
    view: Option<&str>,
) -> Result<(Vec<BundleView>, Option<BundleDetailView>), AppError> {
    let separator = if page_href.contains('?') { '&' } else { '?' };
    let view_base = format!("{page_href}{separator}");
    let rows = bundles
        .iter()
        .map(|b| BundleView::new(b, &view_base))
        .collect();

    let detail = match view.map(str::trim).filter(|v| !v.is_empty()) {
        None => None,
        Some(id) => {
            let bundle = bundles
                .iter()
                .find(|b| b.id.as_str() == id)
                .ok_or_else(|| AppError::NotFound(format!("bundle {id}")))?;
            Some(BundleDetailView {
                bundle: BundleView::new(bundle, &view_base),
                products: bundle.products.iter().map(ProductView::from).collect(),
                close_href: page_href.to_string(),
            })
        }
    };

    Ok((rows, detail))
}

// =============================================================================
// Templates
// =============================================================================

/// Combined bundle creator and list page.
#[derive(Template)]
#[template(path = "bundles/index.html")]
pub struct BundleCreatorTemplate {
    pub current_path: String,
    pub products: Vec<ProductView>,
    pub draft: DraftView,
    pub discount_choices: Vec<i64>,
    pub bundles: Vec<BundleView>,
    pub detail: Option<BundleDetailView>,
    pub created: Option<String>,
    pub error: Option<String>,
}

/// List-only bundle page.
#[derive(Template)]
#[template(path = "bundles/list.html")]
pub struct BundleListTemplate {
    pub current_path: String,
    pub bundles: Vec<BundleView>,
    pub detail: Option<BundleDetailView>,
}

fn render_creator(
    catalog: &BundleCatalog,
    draft: &BundleDraft,
    view: Option<&str>,
    created: Option<String>,
    error: Option<String>,
) -> Result<String, AppError> {
    let draft_view = DraftView::new(draft, &catalog.products);
    let page_href = format!("{CREATOR_PATH}?{}", draft_view.query_string());
    let (bundles, detail) = bundle_views(&catalog.bundles, &page_href, view)?;

    // Keep the configured choices, plus an out-of-range value that came in
    // through the query string so the select still shows it
    let mut discount_choices = DISCOUNT_CHOICES.to_vec();
    if !discount_choices.contains(&draft.discount) {
        discount_choices.push(draft.discount);
    }

    let template = BundleCreatorTemplate {
        current_path: CREATOR_PATH.to_string(),
        products: catalog.products.iter().map(ProductView::from).collect(),
        draft: draft_view,
        discount_choices,
        bundles,
        detail,
        created,
        error,
    };

    Ok(template.render()?)
}

// =============================================================================
// Handlers
// =============================================================================

/// Redirect the bare root to the creator page.
pub async fn root() -> Redirect {
    Redirect::to(CREATOR_PATH)
}

/// Bundle creator page handler.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<CreatorQuery>,
) -> Result<Html<String>, AppError> {
    let mut draft = query.draft.to_draft();
    apply_selection_actions(&mut draft, query.add.as_deref(), query.remove.as_deref());

    let catalog = state.bundles().load_catalog().await?;

    let html = render_creator(
        &catalog,
        &draft,
        query.view.as_deref(),
        query.created.filter(|c| !c.is_empty()),
        None,
    )?;
    Ok(Html(html))
}

/// Create bundle handler.
///
/// Invalid drafts are re-rendered with a message and no bundle is created.
#[instrument(skip(state, form))]
pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<DraftForm>,
) -> Result<Response, AppError> {
    let draft = form.to_draft();

    match state.bundles().create_bundle(draft.clone()).await {
        Ok(created) => {
            let location = format!(
                "{CREATOR_PATH}?created={}",
                urlencoding::encode(&created.title)
            );
            Ok(Redirect::to(&location).into_response())
        }
        Err(e) => {
            match &e {
                BundleCreateError::Invalid(reason) => {
                    tracing::info!(reason = %reason, "Bundle draft rejected");
                }
                BundleCreateError::Shopify(err) => {
                    tracing::error!(error = %err, "Failed to create bundle");
                }
            }

            let catalog = state.bundles().load_catalog().await?;
            let html = render_creator(&catalog, &draft, None, None, Some(e.user_message()))?;
            Ok(Html(html).into_response())
        }
    }
}

/// List-only bundle page handler.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Html<String>, AppError> {
    let bundles = state.bundles().list_bundles().await?;
    let (bundles, detail) = bundle_views(&bundles, LIST_PATH, query.view.as_deref())?;

    let template = BundleListTemplate {
        current_path: LIST_PATH.to_string(),
        bundles,
        detail,
    };

    Ok(Html(template.render()?))
}
