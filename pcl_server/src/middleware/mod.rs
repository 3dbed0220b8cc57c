mod acl;
mod hmac;
mod jwt;

pub use acl::{AclMiddlewareFactory, AclMiddlewareService};
pub use hmac::{HmacMiddlewareFactory, HmacMiddlewareService, RAZORPAY_SIGNATURE_HEADER};
pub use jwt::{JwtMiddlewareFactory, JwtMiddlewareService};
