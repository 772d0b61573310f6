use sqlx::PgPool;

use crate::{error::Result, models::User};

pub async fn find_by_user_name(pool: &PgPool, user_name: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "SELECT user_name, user_password FROM order_app_api_user WHERE user_name = $1",
    )
    .bind(user_name)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}
