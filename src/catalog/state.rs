//! Catalog Store
//!
//! In-memory product document store with filtered, sorted, paginated
//! queries and the view-count side effect on single-product reads.

use super::models::{Pagination, Product, ProductPage, ProductQuery, SortField, SortOrder};
use chrono::{Duration, Utc};
use dashmap::DashMap;
use rand::seq::SliceRandom;
use rand::Rng;
use std::sync::Arc;
use uuid::Uuid;

/// Product document store, keyed by product id. Cloning yields another
/// handle to the same store.
/// DashMap allows concurrent access without external Mutexes.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Arc<DashMap<String, Product>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts (or replaces) a product document
    pub fn insert(&self, product: Product) {
        self.products.insert(product.id.clone(), product);
    }

    /// Runs a filtered, sorted, paginated query.
    ///
    /// A page past the end of the result set yields an empty product list
    /// with correct metadata rather than an error.
    pub fn query(&self, query: &ProductQuery) -> ProductPage {
        let mut matches: Vec<Product> = self
            .products
            .iter()
            .filter(|entry| matches_query(entry.value(), query))
            .map(|entry| entry.value().clone())
            .collect();

        matches.sort_by(|a, b| {
            let ordering = match query.sort {
                SortField::Name => a.name.cmp(&b.name),
                SortField::Price => a.price.total_cmp(&b.price),
                SortField::Views => a.views.cmp(&b.views),
                SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            };
            let ordering = match query.order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            };
            // Newest-first tiebreak keeps pages disjoint when the primary
            // key has ties.
            ordering.then_with(|| b.created_at.cmp(&a.created_at))
        });

        let total = matches.len() as u64;
        let page_size = query.page_size.clamp(1, 100);
        let page = query.page.max(1);
        let total_pages = total.div_ceil(page_size);

        let start = (page - 1).saturating_mul(page_size) as usize;
        let products: Vec<Product> = matches
            .into_iter()
            .skip(start)
            .take(page_size as usize)
            .collect();

        ProductPage {
            products,
            pagination: Pagination {
                page,
                total_pages,
                total,
                page_size,
            },
        }
    }

    /// Looks a product up by id or slug, bumping its view counter on a hit.
    ///
    /// The increment is fire-and-forget bookkeeping; the returned snapshot
    /// already reflects it. A stale or malformed key is simply a miss.
    pub fn find(&self, key: &str) -> Option<Product> {
        if let Some(mut entry) = self.products.get_mut(key) {
            entry.views += 1;
            return Some(entry.clone());
        }

        let id = self
            .products
            .iter()
            .find(|entry| entry.slug == key)
            .map(|entry| entry.id.clone())?;
        let mut entry = self.products.get_mut(&id)?;
        entry.views += 1;
        Some(entry.clone())
    }

    /// A uniformly random published product, for the purchase simulator.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Product> {
        let ids: Vec<String> = self
            .products
            .iter()
            .filter(|entry| entry.published)
            .map(|entry| entry.id.clone())
            .collect();
        let id = ids.choose(rng)?;
        self.products.get(id).map(|entry| entry.clone())
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Loads the sample agricultural-equipment catalog.
    pub fn seed(&self) {
        let now = Utc::now();
        let samples: [(&str, &str, f64, &str, Option<&str>, Option<&str>); 8] = [
            ("Automatic Egg Incubator 528", "poultry-equipment", 945.0, "528-egg fully automatic incubator with humidity control", Some("incubators"), Some("SureHatch")),
            ("Chick Feeder Tray", "poultry-equipment", 12.5, "Round feeder tray for day-old chicks", Some("feeders"), Some("AgroPlus")),
            ("Bell Drinker 5L", "poultry-equipment", 9.75, "Hanging bell drinker, 5 litre reservoir", Some("drinkers"), Some("AgroPlus")),
            ("Battery Cage 96-Bird", "poultry-equipment", 410.0, "Galvanized 4-tier layer cage, 96 bird capacity", Some("cages"), Some("FarmKing")),
            ("Brooder Heat Lamp", "poultry-equipment", 28.0, "Infrared heat lamp for brooding pens", Some("brooding"), None),
            ("Feed Mill 2-Ton", "farm-machinery", 2350.0, "2-ton-per-hour hammer mill with mixer", Some("milling"), Some("FarmKing")),
            ("Knapsack Sprayer 16L", "farm-machinery", 39.9, "Manual 16 litre knapsack sprayer", Some("spraying"), Some("GreenWorks")),
            ("Drip Irrigation Kit", "irrigation", 120.0, "Quarter-acre drip irrigation starter kit", None, Some("GreenWorks")),
        ];

        for (index, (name, category, price, description, subcategory, brand)) in
            samples.into_iter().enumerate()
        {
            let slug = name
                .to_lowercase()
                .chars()
                .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
                .collect::<String>();
            self.insert(Product {
                id: Uuid::new_v4().simple().to_string(),
                slug,
                name: name.to_owned(),
                description: description.to_owned(),
                price,
                category: category.to_owned(),
                subcategory: subcategory.map(str::to_owned),
                brand: brand.map(str::to_owned),
                image: None,
                published: true,
                featured: index < 3,
                on_sale: index % 3 == 0,
                in_stock: index != 5,
                views: 0,
                created_at: now - Duration::days(index as i64),
            });
        }
    }
}

fn text_matches(wanted: Option<&str>, actual: Option<&str>) -> bool {
    match wanted {
        Some(wanted) => actual.is_some_and(|actual| wanted.eq_ignore_ascii_case(actual)),
        None => true,
    }
}

fn matches_query(product: &Product, query: &ProductQuery) -> bool {
    if !text_matches(query.category.as_deref(), Some(&product.category))
        || !text_matches(query.subcategory.as_deref(), product.subcategory.as_deref())
        || !text_matches(query.brand.as_deref(), product.brand.as_deref())
    {
        return false;
    }

    let flag_filters = [
        (query.published, product.published),
        (query.featured, product.featured),
        (query.on_sale, product.on_sale),
        (query.in_stock, product.in_stock),
    ];
    for (wanted, actual) in flag_filters {
        if let Some(wanted) = wanted {
            if wanted != actual {
                return false;
            }
        }
    }

    if let Some(min) = query.min_price {
        if product.price < min {
            return false;
        }
    }
    if let Some(max) = query.max_price {
        if product.price > max {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, name: &str, price: f64, category: &str) -> Product {
        Product {
            id: id.to_owned(),
            slug: format!("{id}-slug"),
            name: name.to_owned(),
            description: String::new(),
            price,
            category: category.to_owned(),
            subcategory: None,
            brand: None,
            image: None,
            published: true,
            featured: false,
            on_sale: false,
            in_stock: true,
            views: 0,
            created_at: Utc::now(),
        }
    }

    fn seeded() -> Catalog {
        let catalog = Catalog::new();
        let mut feeder = product("p1", "Feeder", 100.0, "poultry-equipment");
        feeder.brand = Some("AgroPlus".into());
        feeder.on_sale = true;
        let mut drinker = product("p2", "Drinker", 45.0, "poultry-equipment");
        drinker.brand = Some("AgroPlus".into());
        drinker.in_stock = false;
        let mut sprayer = product("p3", "Sprayer", 250.0, "farm-machinery");
        sprayer.published = false;
        catalog.insert(feeder);
        catalog.insert(drinker);
        catalog.insert(sprayer);
        catalog
    }

    #[test]
    fn category_and_flag_filters_compose() {
        let catalog = seeded();

        let page = catalog.query(&ProductQuery {
            category: Some("poultry-equipment".into()),
            ..Default::default()
        });
        assert_eq!(page.pagination.total, 2);

        let page = catalog.query(&ProductQuery {
            category: Some("poultry-equipment".into()),
            in_stock: Some(true),
            ..Default::default()
        });
        assert_eq!(page.pagination.total, 1);
        assert_eq!(page.products[0].name, "Feeder");

        let page = catalog.query(&ProductQuery {
            published: Some(false),
            ..Default::default()
        });
        assert_eq!(page.pagination.total, 1);
        assert_eq!(page.products[0].name, "Sprayer");
    }

    #[test]
    fn price_bounds_are_inclusive() {
        let catalog = seeded();
        let page = catalog.query(&ProductQuery {
            min_price: Some(45.0),
            max_price: Some(100.0),
            ..Default::default()
        });
        assert_eq!(page.pagination.total, 2);
    }

    #[test]
    fn sort_by_price_both_directions() {
        let catalog = seeded();

        let asc = catalog.query(&ProductQuery {
            sort: SortField::Price,
            order: SortOrder::Asc,
            ..Default::default()
        });
        let prices: Vec<f64> = asc.products.iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![45.0, 100.0, 250.0]);

        let desc = catalog.query(&ProductQuery {
            sort: SortField::Price,
            order: SortOrder::Desc,
            ..Default::default()
        });
        let prices: Vec<f64> = desc.products.iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![250.0, 100.0, 45.0]);
    }

    #[test]
    fn pagination_metadata_and_out_of_range_pages() {
        let catalog = Catalog::new();
        for i in 0..7 {
            catalog.insert(product(&format!("p{i}"), &format!("Product {i}"), 10.0, "c"));
        }

        let page = catalog.query(&ProductQuery {
            page: 2,
            page_size: 3,
            sort: SortField::Name,
            order: SortOrder::Asc,
            ..Default::default()
        });
        assert_eq!(page.products.len(), 3);
        assert_eq!(
            page.pagination,
            Pagination { page: 2, total_pages: 3, total: 7, page_size: 3 }
        );

        let past_end = catalog.query(&ProductQuery {
            page: 9,
            page_size: 3,
            ..Default::default()
        });
        assert!(past_end.products.is_empty());
        assert_eq!(past_end.pagination.total, 7);

        let empty = Catalog::new().query(&ProductQuery::default());
        assert_eq!(empty.pagination.total_pages, 0);
    }

    #[test]
    fn zero_page_is_coerced_to_first() {
        let catalog = seeded();
        let page = catalog.query(&ProductQuery {
            page: 0,
            ..Default::default()
        });
        assert_eq!(page.pagination.page, 1);
        assert!(!page.products.is_empty());
    }

    #[test]
    fn find_increments_views_by_id_and_slug() {
        let catalog = seeded();

        let by_id = catalog.find("p1").expect("hit by id");
        assert_eq!(by_id.views, 1);

        let by_slug = catalog.find("p1-slug").expect("hit by slug");
        assert_eq!(by_slug.views, 2);

        assert!(catalog.find("does-not-exist").is_none());
    }

    #[test]
    fn sample_only_draws_published_products() {
        let catalog = seeded();
        let mut rng = rand::thread_rng();
        for _ in 0..20 {
            let product = catalog.sample(&mut rng).expect("catalog non-empty");
            assert!(product.published);
        }
    }

    #[test]
    fn seed_loads_the_sample_catalog() {
        let catalog = Catalog::new();
        catalog.seed();
        assert_eq!(catalog.len(), 8);
        assert!(catalog.find("automatic-egg-incubator-528").is_some());
    }
}
