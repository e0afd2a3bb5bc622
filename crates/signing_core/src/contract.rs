//! Fixed legal terms and contract text rendering.

use chrono::{DateTime, NaiveDate, Utc};
use shared::domain::ClientMetadata;

pub const COMPANY_NAME: &str = "TRADER BROTHERS LTD";
pub const COMPANY_TAGLINE: &str = "Professional Joinery Services & Bespoke Craftsmanship";
pub const DOCUMENT_TITLE: &str = "STANDARD TERMS & CONDITIONS OF SUPPLY";
pub const COMPANY_INFO_BLOCK: &str = "Trader Brothers Ltd\nRegistration: [Company Registration Number]\nVAT Number: [VAT Registration Number]\nAddress: [Business Address]";

pub struct TermsSection {
    pub title: &'static str,
    pub body: &'static str,
}

/// The numbered clauses rendered into the PDF. Sections 1 and 2 (company
/// and client information) are composed dynamically.
pub const TERMS: &[TermsSection] = &[
    TermsSection {
        title: "3. SERVICES",
        body: "We provide professional joinery services including but not limited to: bespoke furniture manufacture, kitchen and bedroom fitting, commercial fit-outs, restoration work, and architectural millwork. All services are provided in accordance with industry standards and building regulations.",
    },
    TermsSection {
        title: "4. QUOTATIONS AND PRICING",
        body: "All quotations are valid for 30 days from date of issue unless otherwise stated. Prices are exclusive of VAT unless otherwise indicated. We reserve the right to adjust prices for variations to the original specification, changes in material costs, or additional work requested by the client.",
    },
    TermsSection {
        title: "5. PAYMENT TERMS",
        body: "Payment is due within 30 days of invoice date unless otherwise agreed in writing. For projects exceeding \u{a3}5,000, we may require stage payments as work progresses. Late payment may incur charges in accordance with the Late Payment of Commercial Debts (Interest) Act 1998.",
    },
    TermsSection {
        title: "6. MATERIALS AND WORKMANSHIP",
        body: "All materials supplied will be of merchantable quality and suitable for purpose. We provide a 12-month warranty on workmanship from completion date. Manufacturer warranties on materials and hardware are passed through to the client. Any defects must be reported promptly for remedy under warranty.",
    },
    TermsSection {
        title: "7. SITE ACCESS AND CLIENT OBLIGATIONS",
        body: "The client must provide safe and reasonable access to the work site, adequate storage space for materials, and a clean, dry working environment. Any delays caused by lack of access, site conditions, or client preparation will be charged at our standard hourly rates.",
    },
    TermsSection {
        title: "8. VARIATIONS AND CHANGES",
        body: "Any changes to the original specification must be agreed in writing before commencement. Additional work will be charged according to our standard rates and may affect completion dates. We will provide written estimates for all significant variations before proceeding.",
    },
    TermsSection {
        title: "9. LIMITATION OF LIABILITY",
        body: "Our liability is limited to the contract value or \u{a3}100,000, whichever is lower, except for death or personal injury caused by our negligence. We are not liable for indirect or consequential losses. Our insurance covers public liability of \u{a3}2,000,000 and professional indemnity of \u{a3}500,000.",
    },
    TermsSection {
        title: "10. RETENTION OF TITLE",
        body: "Materials remain our property until payment is received in full. We reserve the right to remove unpaid materials from site. Risk in materials passes to the client upon delivery to site.",
    },
    TermsSection {
        title: "11. FORCE MAJEURE",
        body: "We are not liable for delays caused by circumstances beyond our reasonable control including but not limited to: material supply shortages, extreme weather, labour disputes, or government restrictions.",
    },
    TermsSection {
        title: "12. HEALTH AND SAFETY",
        body: "We maintain comprehensive health and safety policies and insurance. All personnel are appropriately trained and certified. We comply with all relevant health and safety legislation and CDM regulations where applicable.",
    },
    TermsSection {
        title: "13. TERMINATION",
        body: "Either party may terminate this agreement with 30 days written notice. In the event of termination, payment is due for all work completed up to the termination date. Any work in progress will be completed to a safe stopping point or as mutually agreed. Materials ordered specifically for the project remain the client's responsibility for payment.",
    },
    TermsSection {
        title: "14. INTELLECTUAL PROPERTY RIGHTS",
        body: "Custom designs and plans remain the property of Trader Brothers unless specifically transferred in writing. We retain the right to use completed projects for portfolio and marketing purposes unless client requests confidentiality in writing. All client information and project details are treated as confidential and will not be disclosed to third parties without consent.",
    },
    TermsSection {
        title: "15. DATA PROTECTION",
        body: "We process personal data in accordance with GDPR and UK data protection legislation. Client information is held securely and used only for legitimate business purposes related to service provision.",
    },
    TermsSection {
        title: "16. DISPUTE RESOLUTION",
        body: "Any disputes will first be addressed through direct negotiation. If unresolved, disputes will be subject to mediation under the Centre for Dispute Resolution (CEDR) rules. These terms are governed by English law and subject to the jurisdiction of English courts.",
    },
];

/// UK display format used on the review screen and in rendered documents.
pub fn format_date_uk(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Short-form contract text carried in the webhook body. The PDF carries
/// the long-form clauses from [`TERMS`]; this summary mirrors the wording
/// the webhook consumer already files.
pub fn render_full_contract(
    client_name: &str,
    agreement_date: NaiveDate,
    executed_at: DateTime<Utc>,
    metadata: &ClientMetadata,
) -> String {
    format!(
        "{company}\n{title}\n\n\
         AGREEMENT DETAILS:\n\
         Client Name/Company: {client_name}\n\
         Agreement Date: {date}\n\
         Execution Time: {executed}\n\n\
         COMPANY INFORMATION:\n{info}\n\n\
         CLIENT INFORMATION:\n\
         Company: {client_company}\n\
         Address: {client_address}\n\
         Email: {client_email}\n\
         Phone: {client_phone}\n\
         Project Contact: {client_contact}\n\n\
         TERMS AND CONDITIONS:\n\n\
         1. SERVICES: Professional joinery services including bespoke furniture manufacture, kitchen and bedroom fitting, commercial fit-outs, restoration work, and architectural millwork.\n\n\
         2. QUOTATIONS: Valid for 30 days from issue. Prices exclusive of VAT unless indicated.\n\n\
         3. PAYMENT: Due within 30 days of invoice. Projects over \u{a3}5,000 may require stage payments.\n\n\
         4. WARRANTY: 12-month warranty on workmanship from completion date.\n\n\
         5. LIABILITY: Limited to contract value or \u{a3}100,000 (whichever lower). Public liability \u{a3}2,000,000, Professional indemnity \u{a3}500,000.\n\n\
         6. MATERIALS: Remain our property until payment received in full.\n\n\
         7. VARIATIONS: Must be agreed in writing before commencement.\n\n\
         8. TERMINATION: 30 days written notice required.\n\n\
         9. DISPUTE RESOLUTION: Subject to English law and jurisdiction.\n\n\
         DIGITAL SIGNATURE: Provided and Verified\n\n\
         This agreement is legally binding upon digital signature.\n",
        company = COMPANY_NAME,
        title = DOCUMENT_TITLE,
        date = format_date_uk(agreement_date),
        executed = executed_at.format("%d/%m/%Y, %H:%M:%S"),
        info = COMPANY_INFO_BLOCK,
        client_company = metadata.company_display(),
        client_address = metadata.address_display(),
        client_email = metadata.email_display(),
        client_phone = metadata.phone_display(),
        client_contact = metadata.contact_display(),
    )
}
