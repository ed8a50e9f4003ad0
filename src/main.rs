fn main() {
    todo_desk_lib::run()
}
