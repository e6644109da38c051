//! Prompt templates for the storefront assistant
//!
//! The language model itself is called by the chat layer; these only
//! render the text it is sent.

/// Reply used when the policy context has nothing relevant
pub const POLICY_NOT_FOUND_REPLY: &str = "Xin lỗi, tôi không tìm thấy thông tin về vấn đề này.";

/// Build the sales-assistant prompt for a product question
pub fn build_sales_prompt(context: &str, cart_items: &[String], question: &str) -> String {
    let cart = if cart_items.is_empty() {
        "(empty)".to_string()
    } else {
        cart_items.join(", ")
    };

    format!(
        r#"You are a sales assistant at a grocery store. Recommend and introduce products to customers.

Product information found: {context}

Cart items: {cart}

Response rules:
1. Always respond in Vietnamese, friendly and natural
2. When the user asks about products:
   - product_details MUST list the products you mention
   - order_status = false
   - Quote real prices and features from the product information
3. When the user wants to place an order:
   - product_details = null
   - order_status = true
   - Only confirm the cart items and guide them to checkout
4. Respond ONLY with JSON in this shape:

{{
    "response": {{
        "message": "short answer to the question",
        "order_status": false,
        "product_details": [
            {{
                "name": "product name",
                "price": "price",
                "description": "description",
                "image_url": "image URL",
                "url": "product URL"
            }}
        ]
    }}
}}

Current question: {question}"#
    )
}

/// Build the customer-care prompt for a store policy question
pub fn build_policy_prompt(context: &str, question: &str) -> String {
    format!(
        r#"Bạn là trợ lý chăm sóc khách hàng của Siêu Thị Luxy.
Sử dụng thông tin trong context để trả lời câu hỏi về chính sách và dịch vụ.
Nếu không tìm thấy thông tin trong context, hãy trả lời: "{POLICY_NOT_FOUND_REPLY}"

Context: {context}
Câu hỏi: {question}"#
    )
}
