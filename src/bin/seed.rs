// src/bin/seed.rs
use dotenv::dotenv;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::env;
use std::process;
use std::time::{Duration, Instant};

// --- ANSI colors for the terminal ---
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

// --- Result bookkeeping ---

#[derive(Debug)]
struct SeedResult {
    section: String,
    icon: String,
    success: bool,
    created: u32,
    skipped: u32,
    duration_secs: f64,
}

enum CreateOutcome {
    Created(Value),
    Exists,
}

// --- Manager logic ---

struct SeedManager {
    base_url: String,
    client: Client,
    token: String,
    results: Vec<SeedResult>,
}

impl SeedManager {
    fn new(base_url: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            client,
            token: String::new(),
            results: Vec::new(),
        }
    }

    async fn check_service_health(&self) -> bool {
        match self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    async fn login(&mut self, email: &str, password: &str) -> Result<(), String> {
        let response = self
            .client
            .post(format!("{}/auth/login", self.base_url))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(format!("HTTP {} - {}", status, body));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse login response: {}", e))?;
        let role = body["user"]["role"].as_str().unwrap_or("user").to_string();
        if role != "admin" && role != "editor" {
            return Err(format!(
                "Account {} holds role '{}', seeding needs a staff account",
                email, role
            ));
        }

        self.token = body["token"]
            .as_str()
            .ok_or("Login response carried no token")?
            .to_string();
        Ok(())
    }

    async fn create_one(&self, endpoint: &str, payload: &Value) -> Result<CreateOutcome, String> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, endpoint))
            .bearer_auth(&self.token)
            .json(payload)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        match response.status() {
            StatusCode::CREATED | StatusCode::OK => {
                let body: Value = response
                    .json()
                    .await
                    .map_err(|e| format!("Failed to parse response JSON: {}", e))?;
                Ok(CreateOutcome::Created(body))
            }
            StatusCode::CONFLICT => Ok(CreateOutcome::Exists),
            status => {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                Err(format!("HTTP {} - {}", status, body))
            }
        }
    }

    /// Fetch an index of slug -> id for the given listing endpoint
    async fn fetch_slug_index(&self, endpoint: &str) -> Result<HashMap<String, String>, String> {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, endpoint))
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse listing JSON: {}", e))?;

        // Plain arrays and paginated {data: []} bodies both occur
        let items = body
            .as_array()
            .cloned()
            .or_else(|| body["data"].as_array().cloned())
            .unwrap_or_default();

        let mut index = HashMap::new();
        for item in items {
            if let (Some(slug), Some(id)) = (item["slug"].as_str(), item["id"].as_str()) {
                index.insert(slug.to_string(), id.to_string());
            }
        }
        Ok(index)
    }

    async fn seed_section(
        &mut self,
        section: &str,
        icon: &str,
        endpoint: &str,
        payloads: Vec<Value>,
    ) {
        let start_time = Instant::now();
        let mut created = 0u32;
        let mut skipped = 0u32;
        let mut success = true;

        println!("{}Seeding {} {}...{}", CYAN, icon, section, RESET);

        for payload in &payloads {
            match self.create_one(endpoint, payload).await {
                Ok(CreateOutcome::Created(_)) => created += 1,
                Ok(CreateOutcome::Exists) => skipped += 1,
                Err(err_msg) => {
                    println!("{}❌ {}: {}{}", RED, section, err_msg, RESET);
                    success = false;
                }
            }
        }

        let duration = start_time.elapsed().as_secs_f64();
        println!(
            "{}✅ {} {}: {} new, {} skipped ({:.1}s){}",
            GREEN, icon, section, created, skipped, duration, RESET
        );

        self.results.push(SeedResult {
            section: section.to_string(),
            icon: icon.to_string(),
            success,
            created,
            skipped,
            duration_secs: duration,
        });
    }

    async fn run_full_seed(&mut self) -> Result<(), String> {
        println!("\n{}🔍 Checking service status...{}", CYAN, RESET);
        if !self.check_service_health().await {
            println!("{}❌ Service unavailable.{}", RED, RESET);
            println!(
                "{}Please ensure rihla-api is running (cargo run){}",
                YELLOW, RESET
            );
            process::exit(1);
        }
        println!("{}✅ Service available{}\n", GREEN, RESET);

        self.print_header();

        // Reference data first, then content that points at it
        self.seed_section(
            "Destinations",
            "🌍",
            "/destinations",
            destination_payloads(),
        )
        .await;
        let destinations = self.fetch_slug_index("/destinations").await?;

        self.seed_section("Categories", "🏷️", "/categories", category_payloads())
            .await;
        let categories = self.fetch_slug_index("/categories").await?;

        self.seed_section(
            "Activity categories",
            "🤿",
            "/activity-categories",
            activity_category_payloads(),
        )
        .await;

        self.seed_section("Hotels", "🏨", "/hotels", hotel_payloads(&destinations))
            .await;
        let hotels = self.fetch_slug_index("/hotels?limit=100").await?;

        self.seed_section(
            "Packages",
            "✈️",
            "/packages",
            package_payloads(&destinations, &categories, &hotels),
        )
        .await;

        self.seed_section("Coupons", "🎟️", "/coupons", coupon_payloads())
            .await;

        self.seed_translations().await;

        self.print_summary();
        Ok(())
    }

    /// Translations go through PUT per locale instead of one POST per row
    async fn seed_translations(&mut self) {
        let start_time = Instant::now();
        let mut created = 0u32;
        let mut skipped = 0u32;
        let mut success = true;

        println!("{}Seeding 🌐 Translations...{}", CYAN, RESET);

        for (locale, entries) in translation_payloads() {
            let response = self
                .client
                .put(format!("{}/translations/{}", self.base_url, locale))
                .bearer_auth(&self.token)
                .json(&json!({ "entries": entries }))
                .send()
                .await;

            match response {
                Ok(resp) if resp.status().is_success() => {
                    let body: Value = resp.json().await.unwrap_or_default();
                    created += body["created"].as_u64().unwrap_or(0) as u32;
                    skipped += body["updated"].as_u64().unwrap_or(0) as u32;
                }
                Ok(resp) => {
                    println!(
                        "{}❌ Translations {}: HTTP {}{}",
                        RED,
                        locale,
                        resp.status(),
                        RESET
                    );
                    success = false;
                }
                Err(e) => {
                    println!("{}❌ Translations {}: {}{}", RED, locale, e, RESET);
                    success = false;
                }
            }
        }

        let duration = start_time.elapsed().as_secs_f64();
        println!(
            "{}✅ 🌐 Translations: {} new, {} updated ({:.1}s){}",
            GREEN, created, skipped, duration, RESET
        );

        self.results.push(SeedResult {
            section: "Translations".to_string(),
            icon: "🌐".to_string(),
            success,
            created,
            skipped,
            duration_secs: duration,
        });
    }

    fn print_header(&self) {
        println!(
            "{}╔══════════════════════════════════════════════════════════════╗{}",
            CYAN, RESET
        );
        println!(
            "{}║   🧳  Rihla Seeder - destinations, packages and hotels       ║{}",
            CYAN, RESET
        );
        println!(
            "{}╚══════════════════════════════════════════════════════════════╝{}",
            CYAN, RESET
        );
        println!();
    }

    fn print_summary(&self) {
        println!("\n\n{}📋 Seeding Summary{}", BOLD, RESET);
        println!("──────────────────────────────────────────────────────────");
        println!(
            "{:<30} {:<8} {:>8} {:>8}",
            "Section", "Status", "New", "Skipped"
        );
        println!("──────────────────────────────────────────────────────────");

        let mut total_created = 0;
        let mut total_skipped = 0;
        let mut total_duration = 0.0;

        for res in &self.results {
            let status_icon = if res.success { "✅" } else { "❌" };
            println!(
                "{:<30} {:<8} {:>8} {:>8}",
                format!("{} {}", res.icon, res.section),
                status_icon,
                res.created,
                res.skipped
            );

            total_created += res.created;
            total_skipped += res.skipped;
            total_duration += res.duration_secs;
        }

        println!("──────────────────────────────────────────────────────────");
        println!("\n{}✨ Seeding Completed{}", GREEN, RESET);
        println!("{}📊 Totals:{}", BOLD, RESET);
        println!("  • Records created: {}{}{}", GREEN, total_created, RESET);
        println!("  • Already present: {}{}{}", YELLOW, total_skipped, RESET);
        println!("  • Total Duration: {:.1}s", total_duration);
    }
}

// --- Seed data ---

fn destination_payloads() -> Vec<Value> {
    vec![
        json!({
            "name_en": "Dubai", "name_ar": "دبي", "country_code": "AE",
            "description_en": "Skyline, souks and desert at the edge of the Gulf.",
            "description_ar": "ناطحات سحاب وأسواق وصحراء على حافة الخليج.",
            "is_featured": true
        }),
        json!({
            "name_en": "Istanbul", "name_ar": "إسطنبول", "country_code": "TR",
            "description_en": "Two continents, one city on the Bosphorus.",
            "description_ar": "قارتان ومدينة واحدة على مضيق البوسفور.",
            "is_featured": true
        }),
        json!({
            "name_en": "Cairo", "name_ar": "القاهرة", "country_code": "EG",
            "description_en": "The pyramids, the Nile and a thousand years of bazaars.",
            "description_ar": "الأهرامات والنيل وألف عام من الأسواق.",
            "is_featured": true
        }),
        json!({
            "name_en": "Doha", "name_ar": "الدوحة", "country_code": "QA",
            "description_en": "Museums and dunes around a glittering corniche.",
            "description_ar": "متاحف وكثبان حول كورنيش متلألئ.",
            "is_featured": false
        }),
        json!({
            "name_en": "Amman", "name_ar": "عمّان", "country_code": "JO",
            "description_en": "Gateway to Petra and the Dead Sea.",
            "description_ar": "بوابة البتراء والبحر الميت.",
            "is_featured": false
        }),
    ]
}

fn category_payloads() -> Vec<Value> {
    vec![
        json!({
            "name_en": "Beach Getaways", "name_ar": "عطلات الشاطئ",
            "icon": "🏖️", "sort_order": 1
        }),
        json!({
            "name_en": "Desert Adventures", "name_ar": "مغامرات الصحراء",
            "icon": "🐪", "sort_order": 2
        }),
        json!({
            "name_en": "City Breaks", "name_ar": "عطلات المدينة",
            "icon": "🏙️", "sort_order": 3
        }),
        json!({
            "name_en": "Honeymoon", "name_ar": "شهر العسل",
            "icon": "💞", "sort_order": 4
        }),
    ]
}

fn activity_category_payloads() -> Vec<Value> {
    vec![
        json!({
            "name_en": "Diving", "name_ar": "الغوص",
            "icon": "🤿", "sort_order": 1
        }),
        json!({
            "name_en": "Desert Safari", "name_ar": "سفاري الصحراء",
            "icon": "🏜️", "sort_order": 2
        }),
        json!({
            "name_en": "Culture and Heritage", "name_ar": "الثقافة والتراث",
            "icon": "🏛️", "sort_order": 3
        }),
        json!({
            "name_en": "Theme Parks", "name_ar": "مدن الملاهي",
            "icon": "🎢", "sort_order": 4
        }),
    ]
}

fn hotel_payloads(destinations: &HashMap<String, String>) -> Vec<Value> {
    let dest = |slug: &str| destinations.get(slug).cloned().unwrap_or_default();

    vec![
        json!({
            "name_en": "Burj View Hotel", "name_ar": "فندق إطلالة البرج",
            "city": "Dubai", "country_code": "AE",
            "destination_id": dest("dubai"),
            "address": "Sheikh Zayed Road, Downtown",
            "star_rating": 5, "tbo_hotel_code": "1402689",
            "price_per_night": 240.0, "total_rooms": 180,
            "amenities": ["pool", "spa", "gym", "parking"]
        }),
        json!({
            "name_en": "Palm Marina Resort", "name_ar": "منتجع مرسى النخلة",
            "city": "Dubai", "country_code": "AE",
            "destination_id": dest("dubai"),
            "address": "Palm Jumeirah, Crescent Road",
            "star_rating": 5, "tbo_hotel_code": "1405349",
            "price_per_night": 310.0, "total_rooms": 220,
            "amenities": ["beach", "pool", "kids-club"]
        }),
        json!({
            "name_en": "Bosphorus Pearl", "name_ar": "لؤلؤة البوسفور",
            "city": "Istanbul", "country_code": "TR",
            "destination_id": dest("istanbul"),
            "address": "Besiktas, Ciragan Caddesi 28",
            "star_rating": 4,
            "price_per_night": 145.0, "total_rooms": 96,
            "amenities": ["breakfast", "terrace"]
        }),
        json!({
            "name_en": "Nile Grand", "name_ar": "النيل الكبير",
            "city": "Cairo", "country_code": "EG",
            "destination_id": dest("cairo"),
            "address": "Corniche El Nil, Garden City",
            "star_rating": 4,
            "price_per_night": 98.0, "total_rooms": 140,
            "amenities": ["pool", "river-view"]
        }),
        json!({
            "name_en": "Pearl Doha Suites", "name_ar": "أجنحة لؤلؤة الدوحة",
            "city": "Doha", "country_code": "QA",
            "destination_id": dest("doha"),
            "address": "The Pearl, Porto Arabia",
            "star_rating": 5, "tbo_hotel_code": "1534002",
            "price_per_night": 205.0, "total_rooms": 75,
            "amenities": ["marina", "spa"]
        }),
    ]
}

fn package_payloads(
    destinations: &HashMap<String, String>,
    categories: &HashMap<String, String>,
    hotels: &HashMap<String, String>,
) -> Vec<Value> {
    let dest = |slug: &str| destinations.get(slug).cloned().unwrap_or_default();
    let cat = |slug: &str| categories.get(slug).cloned().unwrap_or_default();
    let hotel = |slug: &str| hotels.get(slug).cloned().unwrap_or_default();

    vec![
        json!({
            "title_en": "Dubai Desert Escape", "title_ar": "ملاذ صحراء دبي",
            "description_en": "Four nights downtown with a dune safari and a dhow dinner cruise.",
            "description_ar": "أربع ليالٍ في وسط المدينة مع سفاري الكثبان وعشاء على متن داو.",
            "destination_id": dest("dubai"),
            "category_id": cat("desert-adventures"),
            "hotel_id": hotel("burj-view-hotel"),
            "duration_nights": 4, "base_price": 899.0, "sale_price": 749.0,
            "max_travellers": 8, "is_published": true, "is_featured": true,
            "inclusions": ["airport transfers", "daily breakfast", "dune safari"],
            "exclusions": ["flights", "visa fees"]
        }),
        json!({
            "title_en": "Istanbul City Break", "title_ar": "عطلة مدينة إسطنبول",
            "description_en": "Three nights by the Bosphorus with a guided old town walk.",
            "description_ar": "ثلاث ليالٍ بجوار البوسفور مع جولة مصحوبة بمرشد في المدينة القديمة.",
            "destination_id": dest("istanbul"),
            "category_id": cat("city-breaks"),
            "hotel_id": hotel("bosphorus-pearl"),
            "duration_nights": 3, "base_price": 520.0,
            "max_travellers": 6, "is_published": true, "is_featured": true,
            "inclusions": ["daily breakfast", "old town tour"],
            "exclusions": ["flights"]
        }),
        json!({
            "title_en": "Cairo and the Pyramids", "title_ar": "القاهرة والأهرامات",
            "description_en": "Five nights on the Nile with Giza, Saqqara and the museum.",
            "description_ar": "خمس ليالٍ على النيل مع الجيزة وسقارة والمتحف.",
            "destination_id": dest("cairo"),
            "category_id": cat("city-breaks"),
            "hotel_id": hotel("nile-grand"),
            "duration_nights": 5, "base_price": 640.0, "sale_price": 580.0,
            "max_travellers": 10, "is_published": true, "is_featured": false,
            "inclusions": ["daily breakfast", "Giza day trip", "museum tickets"],
            "exclusions": ["flights", "gratuities"]
        }),
        json!({
            "title_en": "Doha Luxury Weekend", "title_ar": "عطلة نهاية أسبوع فاخرة في الدوحة",
            "description_en": "Two nights at The Pearl with a private dhow sunset cruise.",
            "description_ar": "ليلتان في اللؤلؤة مع رحلة غروب خاصة على متن داو.",
            "destination_id": dest("doha"),
            "category_id": cat("honeymoon"),
            "hotel_id": hotel("pearl-doha-suites"),
            "duration_nights": 2, "base_price": 760.0,
            "max_travellers": 2, "is_published": true, "is_featured": false,
            "inclusions": ["airport transfers", "sunset cruise"],
            "exclusions": ["flights"]
        }),
        json!({
            "title_en": "Dubai Family Week", "title_ar": "أسبوع العائلة في دبي",
            "description_en": "Seven nights on the Palm with park passes for the whole family.",
            "description_ar": "سبع ليالٍ في النخلة مع تذاكر المدن الترفيهية لكل العائلة.",
            "destination_id": dest("dubai"),
            "category_id": cat("beach-getaways"),
            "hotel_id": hotel("palm-marina-resort"),
            "duration_nights": 7, "base_price": 1890.0, "sale_price": 1690.0,
            "max_travellers": 12, "is_published": true, "is_featured": true,
            "inclusions": ["half board", "theme park passes", "kids club"],
            "exclusions": ["flights", "visa fees"]
        }),
    ]
}

fn coupon_payloads() -> Vec<Value> {
    vec![
        json!({
            "code": "WELCOME10",
            "description": "10% off a first booking",
            "discount_type": "percent", "discount_value": 10.0,
            "min_order_amount": 100.0
        }),
        json!({
            "code": "SUMMER25",
            "description": "Flat 25 off summer departures",
            "discount_type": "fixed", "discount_value": 25.0,
            "min_order_amount": 200.0
        }),
        json!({
            "code": "VIP50",
            "description": "Half price for invited accounts, capped",
            "discount_type": "percent", "discount_value": 50.0,
            "max_discount_amount": 300.0, "max_uses": 20
        }),
    ]
}

fn translation_payloads() -> Vec<(&'static str, Vec<Value>)> {
    vec![
        (
            "en",
            vec![
                json!({"key": "nav.home", "value": "Home"}),
                json!({"key": "nav.packages", "value": "Packages"}),
                json!({"key": "nav.destinations", "value": "Destinations"}),
                json!({"key": "booking.confirm", "value": "Confirm booking"}),
                json!({"key": "booking.cancelled", "value": "Booking cancelled"}),
                json!({"key": "coupon.invalid", "value": "This coupon cannot be applied"}),
            ],
        ),
        (
            "ar",
            vec![
                json!({"key": "nav.home", "value": "الرئيسية"}),
                json!({"key": "nav.packages", "value": "الباقات"}),
                json!({"key": "nav.destinations", "value": "الوجهات"}),
                json!({"key": "booking.confirm", "value": "تأكيد الحجز"}),
                json!({"key": "booking.cancelled", "value": "تم إلغاء الحجز"}),
                json!({"key": "coupon.invalid", "value": "لا يمكن تطبيق هذا الكوبون"}),
            ],
        ),
    ]
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let base_url =
        env::var("RIHLA_API_URL").unwrap_or_else(|_| "http://localhost:8004".to_string());
    let admin_email = env::var("SEED_ADMIN_EMAIL").expect("SEED_ADMIN_EMAIL must be set in .env");
    let admin_password =
        env::var("SEED_ADMIN_PASSWORD").expect("SEED_ADMIN_PASSWORD must be set in .env");

    let mut manager = SeedManager::new(base_url);

    println!("{}🔑 Logging in as {}...{}", CYAN, admin_email, RESET);
    if let Err(e) = manager.login(&admin_email, &admin_password).await {
        println!("{}❌ Login failed: {}{}", RED, e, RESET);
        println!(
            "{}Create a staff account first, then re-run the seeder.{}",
            YELLOW, RESET
        );
        process::exit(1);
    }
    println!("{}✅ Authenticated{}", GREEN, RESET);

    if let Err(e) = manager.run_full_seed().await {
        println!("{}❌ Seeding aborted: {}{}", RED, e, RESET);
        process::exit(1);
    }
}
