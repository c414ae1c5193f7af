//! Login, register, and logout commands

use anyhow::{Context as _, Result};
use dialoguer::{Input, Password};

use moneta_core::AuthSession;

use super::Context;

fn prompt_username(provided: Option<String>) -> Result<String> {
    match provided {
        Some(username) => Ok(username),
        None => Ok(Input::new().with_prompt("Username").interact_text()?),
    }
}

fn prompt_password(confirm: bool) -> Result<String> {
    let mut prompt = Password::new().with_prompt("Password");
    if confirm {
        prompt = prompt.with_confirmation("Confirm password", "Passwords do not match");
    }
    Ok(prompt.interact()?)
}

pub async fn cmd_login(ctx: &Context, username: Option<String>) -> Result<()> {
    let username = prompt_username(username)?;
    let password = prompt_password(false)?;

    let (token, user) = ctx
        .api
        .login(&username, &password)
        .await
        .context("Login failed")?;

    ctx.sessions.save(&AuthSession {
        token,
        user: user.clone(),
    })?;

    println!("✓ Signed in as {}", user.username);
    Ok(())
}

pub async fn cmd_register(
    ctx: &Context,
    username: Option<String>,
    email: Option<String>,
) -> Result<()> {
    let username = prompt_username(username)?;
    let email = match email {
        Some(email) => email,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let password = prompt_password(true)?;

    let (token, user) = ctx
        .api
        .register(&username, &email, &password)
        .await
        .context("Registration failed")?;

    ctx.sessions.save(&AuthSession {
        token,
        user: user.clone(),
    })?;

    println!("✓ Account created. Signed in as {}", user.username);
    Ok(())
}

pub fn cmd_logout(ctx: &Context) -> Result<()> {
    ctx.sessions.clear()?;
    match &ctx.session {
        Some(session) => println!("✓ Signed out {}", session.user.username),
        None => println!("Already signed out."),
    }
    Ok(())
}
