use super::Ctx;
use crate::output::print_json;
use anyhow::Context;
use dreamlife_core::auth::{self, Credentials, LocalAuthenticator, SignupForm};

pub fn signup(
    ctx: &Ctx,
    name: String,
    email: String,
    password: String,
    confirm: String,
) -> anyhow::Result<()> {
    let mut store = ctx.store()?;
    let form = SignupForm {
        name,
        email,
        password,
        confirm_password: confirm,
    };
    let session = auth::sign_up(&mut store, &LocalAuthenticator::default(), &form, ctx.clock())?;

    if ctx.json {
        print_json(&session)?;
    } else {
        println!("Welcome, {}! You are logged in as {}.", form.name.trim(), session.email);
    }
    Ok(())
}

pub fn login(ctx: &Ctx, email: String, password: String) -> anyhow::Result<()> {
    let mut store = ctx.store()?;
    let authenticator = LocalAuthenticator::new(auth::stored_identity(&store));
    let credentials = Credentials { email, password };
    let session = auth::log_in(&mut store, &authenticator, &credentials, ctx.clock())?;

    if ctx.json {
        print_json(&session)?;
    } else {
        println!("Logged in as {}.", session.email);
    }
    Ok(())
}

pub fn logout(ctx: &Ctx, purge: bool) -> anyhow::Result<()> {
    let mut store = ctx.store()?;
    let (was_logged_in, purged) = if purge {
        let logged_in = auth::current_session(&store).is_some();
        let removed = store.clear_all().context("failed to clear stored data")?;
        (logged_in, Some(removed))
    } else {
        (auth::end_session(&mut store).context("failed to clear session")?, None)
    };

    if ctx.json {
        print_json(&serde_json::json!({ "logged_out": was_logged_in, "purged": purged }))?;
    } else {
        if was_logged_in {
            println!("Logged out.");
        } else {
            println!("Not logged in.");
        }
        if let Some(n) = purged {
            println!("Erased {n} stored collections.");
        }
    }
    Ok(())
}

pub fn whoami(ctx: &Ctx) -> anyhow::Result<()> {
    let store = ctx.store()?;
    let session = auth::current_session(&store);
    let identity = auth::stored_identity(&store);

    if ctx.json {
        return print_json(&serde_json::json!({ "session": session, "user": identity }));
    }
    match (session, identity) {
        (Some(s), Some(user)) => println!("{} <{}>, logged in since {}", user.name, user.email, s.since),
        (Some(s), None) => println!("{}, logged in since {}", s.email, s.since),
        (None, _) => println!("Not logged in."),
    }
    Ok(())
}
