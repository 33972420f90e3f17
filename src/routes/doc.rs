use utoipa::{
    OpenApi,
    openapi::OpenApi as OpenApiSpec,
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    checkout::{CheckoutPhase, CheckoutReceipt},
    dto::{
        cart::{AddToCartRequest, CartLineDto, CartView},
        products::{CatalogItemList, ProductList},
        profile::{ProfileView, UpdateProfileRequest},
        stock::{PublishStockRequest, StockList, UpdateStockRequest},
    },
    models::{CatalogItem, Category, Producer, Product, StockEntry, User},
    response::{ApiResponse, Meta},
    routes::{cart, checkout, health, params, products, profile, stock},
};

#[derive(OpenApi)]
#[openapi(
    info(title = "GreenMarket", description = "Storefront connecting local producers and consumers"),
    paths(
        health::health_check,
        products::list_products,
        cart::cart_view,
        cart::add_to_cart,
        cart::remove_from_cart,
        cart::open_cart,
        cart::close_cart,
        checkout::checkout,
        stock::list_catalog_items,
        stock::list_stock,
        stock::publish_stock,
        stock::update_stock,
        stock::delete_stock,
        profile::get_profile,
        profile::update_profile
    ),
    components(
        schemas(
            User,
            Producer,
            Product,
            Category,
            CatalogItem,
            StockEntry,
            AddToCartRequest,
            CartLineDto,
            CartView,
            CheckoutReceipt,
            CheckoutPhase,
            PublishStockRequest,
            UpdateStockRequest,
            StockList,
            CatalogItemList,
            ProductList,
            ProfileView,
            UpdateProfileRequest,
            params::CatalogQuery,
            health::HealthData,
            Meta,
            ApiResponse<CartView>,
            ApiResponse<ProductList>,
            ApiResponse<CheckoutReceipt>,
            ApiResponse<ProfileView>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Products", description = "Catalog endpoints"),
        (name = "Cart", description = "Cart endpoints"),
        (name = "Checkout", description = "WhatsApp order handoff"),
        (name = "Stock", description = "Producer stock endpoints"),
        (name = "Profile", description = "Profile endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
