//! Site module

mod api;
mod models;

pub use models::{
    ActiveCustomerCertificate, Certificate, CertificateP12, IpException, RewriteRule, Rule, Site,
    UrlException,
};
