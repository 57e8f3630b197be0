//! Account registration and the login/logout lifecycle.

use anyhow::bail;
use nadzor_core::validate;

use crate::context::AppContext;

use super::user_error;

pub async fn register(
    ctx: &AppContext,
    username: &str,
    email: &str,
    password: &str,
) -> anyhow::Result<()> {
    // Client-side checks before anything reaches the network.
    if let Err(msg) = validate::required_text("username", username) {
        bail!("{msg}");
    }
    if let Err(msg) = validate::email(email) {
        bail!("email: {msg}");
    }
    if password.is_empty() {
        bail!("password cannot be empty");
    }

    ctx.client()?
        .sign_up(username, email, password)
        .await
        .map_err(|e| user_error(e, "register"))?;
    println!("Registered. Run `nadzor login --username {username}` to sign in.");
    Ok(())
}

pub async fn login(ctx: &AppContext, username: &str, password: &str) -> anyhow::Result<()> {
    let user = ctx
        .client()?
        .sign_in(username, password)
        .await
        .map_err(|e| user_error(e, "sign in"))?;
    ctx.store().save(&user)?;
    println!("Signed in as {} <{}>.", user.username, user.email);
    Ok(())
}

pub fn logout(ctx: &AppContext) -> anyhow::Result<()> {
    ctx.store().clear()?;
    println!("Signed out.");
    Ok(())
}
