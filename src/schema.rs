// Bindings for the externally supplied analytics database.

diesel::table! {
    #[sql_name = "Customers"]
    customers (customer_id) {
        customer_id -> Integer,
        first_name -> Text,
        last_name -> Text,
        registration_date -> Text,
    }
}

diesel::table! {
    #[sql_name = "Orders"]
    orders (order_id) {
        order_id -> Integer,
        customer_id -> Integer,
        order_date -> Text,
        total_amount -> Double,
    }
}

diesel::table! {
    #[sql_name = "Order_items"]
    order_items (order_id, product_id) {
        order_id -> Integer,
        product_id -> Integer,
        quantity -> Integer,
        unit_price -> Double,
    }
}

diesel::table! {
    #[sql_name = "Products"]
    products (product_id) {
        product_id -> Integer,
        product_name -> Text,
        category -> Text,
        price -> Double,
    }
}

diesel::joinable!(orders -> customers (customer_id));
diesel::joinable!(order_items -> orders (order_id));
diesel::joinable!(order_items -> products (product_id));

diesel::allow_tables_to_appear_in_same_query!(customers, orders, order_items, products,);
