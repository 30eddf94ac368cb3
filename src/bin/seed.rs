use lensshare_api::{config::AppConfig, db::create_pool};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    // Ensure migrations are applied.
    sqlx::migrate!("./migrations").run(&pool).await?;

    let alice = ensure_profile(
        &pool,
        "6f1c1a34-0b6e-4b5e-9a8e-0d9a4c1e2f01",
        "alice",
    )
    .await?;
    let bob = ensure_profile(
        &pool,
        "6f1c1a34-0b6e-4b5e-9a8e-0d9a4c1e2f02",
        "bob",
    )
    .await?;
    seed_gear(&pool, alice, bob).await?;

    println!("Seed completed. Owner IDs: {alice}, {bob}");
    Ok(())
}

async fn ensure_profile(
    pool: &sqlx::PgPool,
    id: &str,
    display_name: &str,
) -> anyhow::Result<Uuid> {
    let id = Uuid::parse_str(id)?;
    sqlx::query(
        r#"
        INSERT INTO profiles (id, display_name)
        VALUES ($1, $2)
        ON CONFLICT (id) DO UPDATE SET display_name = EXCLUDED.display_name
        "#,
    )
    .bind(id)
    .bind(display_name)
    .execute(pool)
    .await?;

    println!("Ensured profile {display_name}");
    Ok(id)
}

async fn seed_gear(pool: &sqlx::PgPool, alice: Uuid, bob: Uuid) -> anyhow::Result<()> {
    // Fixed ids keep reseeding idempotent.
    let listings = vec![
        (
            "b3a1d5c0-0000-4000-8000-000000000001",
            alice,
            "Canon EOS R5",
            "45MP full-frame mirrorless body, dual card slots",
            "Camera Bodies",
            "excellent",
            25_i64,
            120_i64,
            Some("https://images.example/eos-r5.jpg"),
        ),
        (
            "b3a1d5c0-0000-4000-8000-000000000002",
            alice,
            "RF 70-200mm f/2.8",
            "Telephoto zoom, great for events",
            "Lenses",
            "good",
            15,
            70,
            None,
        ),
        (
            "b3a1d5c0-0000-4000-8000-000000000003",
            bob,
            "Manfrotto Carbon Tripod",
            "Lightweight carbon legs with fluid head",
            "Tripods",
            "good",
            5,
            20,
            Some("https://images.example/manfrotto.jpg"),
        ),
        (
            "b3a1d5c0-0000-4000-8000-000000000004",
            bob,
            "Aputure 120d II",
            "Daylight LED with softbox",
            "Lighting",
            "fair",
            10,
            45,
            None,
        ),
    ];

    for (id, owner, name, desc, category, condition, hourly, daily, image_url) in listings {
        let gear_id = Uuid::parse_str(id)?;
        sqlx::query(
            r#"
            INSERT INTO gear (id, owner_id, name, description, category, condition, available)
            VALUES ($1, $2, $3, $4, $5, $6, true)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(gear_id)
        .bind(owner)
        .bind(name)
        .bind(desc)
        .bind(category)
        .bind(condition)
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO gear_pricing (gear_id, hourly_rate, daily_rate)
            VALUES ($1, $2, $3)
            ON CONFLICT (gear_id) DO NOTHING
            "#,
        )
        .bind(gear_id)
        .bind(hourly)
        .bind(daily)
        .execute(pool)
        .await?;

        if let Some(url) = image_url {
            sqlx::query(
                r#"
                INSERT INTO gear_images (id, gear_id, image_url, is_primary)
                SELECT $1, $2, $3, true
                WHERE NOT EXISTS (SELECT 1 FROM gear_images WHERE gear_id = $2)
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(gear_id)
            .bind(url)
            .execute(pool)
            .await?;
        }
    }

    println!("Seeded gear listings");
    Ok(())
}
