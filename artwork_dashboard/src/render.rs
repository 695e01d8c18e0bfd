//! Server-side html for the single dashboard page.

use artwork_registry::{
    types::{OwnedToken, RegistrationReport, TokenDetails},
    utils::display_address,
};
use ethers::types::{Address, U256};

pub const TITLE: &str = "NFT Artwork Registry";
pub const TRANSACTION_FAILED: &str = "Transaction Failed!";

/// What the last submission produced, if anything. At most one section is filled.
#[derive(Debug, Default)]
pub struct Submission {
    pub register: Option<RegistrationReport>,
    pub query: Option<OwnerQuery>,
    pub token: Option<TokenDetails>,
}

#[derive(Debug)]
pub struct OwnerQuery {
    pub address: String,
    pub tokens: Vec<OwnedToken>,
}

pub struct PageView<'a> {
    pub accounts: &'a [Address],
    pub status_lines: &'a [String],
    /// Inspector dropdown contents, or why they could not be fetched.
    pub token_ids: Result<Vec<U256>, String>,
    pub submission: Submission,
}

pub fn registration_message(tx_hash: &impl std::fmt::Debug) -> String {
    format!("Artwork Registered! Transaction Hash: {tx_hash:?}")
}

pub fn page(view: &PageView) -> String {
    let mut html = String::new();
    head(&mut html, TITLE);

    html.push_str("<aside class=\"sidebar\">\n<h2>Logs and Status</h2>\n<pre>");
    for line in view.status_lines {
        html.push_str(&escape(line));
        html.push('\n');
    }
    html.push_str("</pre>\n</aside>\n<main>\n");
    html.push_str(&format!("<h1>{TITLE}</h1>\n"));

    register_section(&mut html, view.accounts, view.submission.register.as_ref());
    html.push_str("<hr>\n");
    query_section(&mut html, view.submission.query.as_ref());
    html.push_str("<hr>\n");
    token_section(&mut html, &view.token_ids, view.submission.token.as_ref());

    html.push_str("</main>\n</body>\n</html>\n");
    html
}

pub fn error_page(message: &str) -> String {
    let mut html = String::new();
    head(&mut html, TITLE);
    html.push_str(&format!(
        "<main>\n<h1>{TITLE}</h1>\n<div class=\"error\">{}</div>\n<p><a href=\"/\">Back</a></p>\n</main>\n</body>\n</html>\n",
        escape(message)
    ));
    html
}

fn head(html: &mut String, title: &str) {
    html.push_str(&format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n",
        escape(title)
    ));
}

fn register_section(
    html: &mut String,
    accounts: &[Address],
    report: Option<&RegistrationReport>,
) {
    html.push_str(
        "<section id=\"register\">\n<form method=\"post\" action=\"/register\">\n\
         <label>Select Artwork Owner <select name=\"owner\">\n",
    );
    for account in accounts {
        let account = display_address(account);
        html.push_str(&format!("<option value=\"{account}\">{account}</option>\n"));
    }
    html.push_str(
        "</select></label>\n\
         <label>The URI to the artwork <input type=\"text\" name=\"artwork_uri\"></label>\n\
         <button type=\"submit\">Register Artwork</button>\n</form>\n",
    );
    match report {
        Some(RegistrationReport::Registered { tx_hash }) => {
            html.push_str(&format!(
                "<div class=\"success\">{}</div>\n",
                registration_message(tx_hash)
            ));
        }
        Some(RegistrationReport::Failed) => {
            html.push_str(&format!("<div class=\"error\">{TRANSACTION_FAILED}</div>\n"));
        }
        None => {}
    }
    html.push_str("</section>\n");
}

fn query_section(html: &mut String, query: Option<&OwnerQuery>) {
    let address = query.map(|q| escape(&q.address)).unwrap_or_default();
    html.push_str(&format!(
        "<section id=\"query\">\n<h3>Query NFTs by Address</h3>\n\
         <form method=\"post\" action=\"/query\">\n\
         <label>Enter Ethereum address to fetch associated NFTs \
         <input type=\"text\" name=\"address\" value=\"{address}\"></label>\n\
         <button type=\"submit\">Fetch NFTs</button>\n</form>\n"
    ));
    if let Some(query) = query {
        html.push_str("<ul class=\"tokens\">\n");
        for token in &query.tokens {
            html.push_str(&format!(
                "<li>Token ID: {} - Artwork: {}</li>\n",
                token.token_id,
                escape(&token.token_uri)
            ));
        }
        html.push_str("</ul>\n");
    }
    html.push_str("</section>\n");
}

fn token_section(
    html: &mut String,
    token_ids: &Result<Vec<U256>, String>,
    details: Option<&TokenDetails>,
) {
    html.push_str(
        "<section id=\"token\">\n<h2>Check Ownership and Display Token</h2>\n\
         <form method=\"post\" action=\"/token\">\n\
         <label>Artwork Tokens <select name=\"token_id\">\n",
    );
    let selected = details.map(|d| d.token_id);
    if let Ok(ids) = token_ids {
        for id in ids {
            let marker = if Some(*id) == selected { " selected" } else { "" };
            html.push_str(&format!("<option value=\"{id}\"{marker}>{id}</option>\n"));
        }
    }
    html.push_str(
        "</select></label>\n<button type=\"submit\">Display Token Details</button>\n</form>\n",
    );
    if let Err(reason) = token_ids {
        html.push_str(&format!(
            "<div class=\"error\">Could not list tokens: {}</div>\n",
            escape(reason)
        ));
    }
    if let Some(details) = details {
        let token_uri = escape(&details.token_uri);
        // rendered as-is: a uri that is not an image shows the browser's broken image
        html.push_str(&format!(
            "<p>Owner: {}</p>\n<p>Token URI: {token_uri}</p>\n<img src=\"{token_uri}\" alt=\"token {}\">\n",
            display_address(&details.owner),
            details.token_id
        ));
    }
    html.push_str("</section>\n");
}

/// Escape text for use in element content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

const STYLE: &str = "body{font-family:sans-serif;display:flex;margin:0}\
.sidebar{width:22rem;min-height:100vh;background:#f0f2f6;padding:1rem}\
.sidebar pre{white-space:pre-wrap;font-size:.8rem}\
main{flex:1;padding:1rem 2rem}label{display:block;margin:.5rem 0}\
.success{background:#d4edda;padding:.5rem}.error{background:#f8d7da;padding:.5rem}\
img{max-width:32rem}";
